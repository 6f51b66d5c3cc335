use std::time::Duration;

use pixmorph::{
    Correspondence, GridSize, MorphConfig, MorphMode, MorphSession, Phase, PixelBuffer, Rgba8,
    Speed, TimingPlan,
};

fn secs(v: f64) -> Duration {
    Duration::from_secs_f64(v)
}

fn textured_pair(grid: GridSize) -> (PixelBuffer, PixelBuffer) {
    let mut source = PixelBuffer::filled(grid, Rgba8::TRANSPARENT);
    let mut target = PixelBuffer::filled(grid, Rgba8::TRANSPARENT);
    for i in 0..grid.pixel_count() {
        source.put_index(
            i,
            Rgba8::opaque((i * 37 % 256) as u8, (i * 101 % 256) as u8, (i * 3 % 256) as u8),
        );
        target.put_index(
            i,
            Rgba8::opaque((i * 53 % 256) as u8, (255 - i * 29 % 256) as u8, (i * 7 % 256) as u8),
        );
    }
    (source, target)
}

fn particle_session(grid_side: u32, speed: u32, seed: u64) -> MorphSession {
    let grid = GridSize::new(grid_side).unwrap();
    let (source, target) = textured_pair(grid);
    let config = MorphConfig {
        grid,
        speed: Speed::new(speed).unwrap(),
        mode: MorphMode::Particles,
    };
    MorphSession::new(config, source, target, seed).unwrap()
}

fn sorted_colors(buf: &PixelBuffer) -> Vec<[u8; 4]> {
    let mut colors: Vec<[u8; 4]> = (0..buf.pixel_count())
        .map(|i| buf.get_index(i).to_array())
        .collect();
    colors.sort_unstable();
    colors
}

#[test]
fn swarm_settles_into_the_luminance_bijection() {
    let grid = GridSize::new(12).unwrap();
    let (source, target) = textured_pair(grid);
    let speed = Speed::new(75).unwrap();

    let mut session = particle_session(12, 75, 0xA11CE);
    session.start(Duration::ZERO).unwrap();

    // The timing envelope bounds every delay + duration, so the run must
    // complete within the worst case at a 60 Hz cadence.
    let worst = TimingPlan::from_speed(speed).worst_case_secs();
    let max_ticks = (worst * 60.0).ceil() as u64 + 1;
    let mut ticks = 0u64;
    while session.advance(secs(ticks as f64 / 60.0)).should_continue() {
        ticks += 1;
        assert!(ticks <= max_ticks, "swarm did not settle within its envelope");
    }
    assert_eq!(session.phase(), Phase::Completed);

    // Settled placement: each target cell holds the color of the source
    // pixel mapped to it, nothing lost, nothing duplicated.
    let corr = Correspondence::between(&source, &target).unwrap();
    let mut expected = PixelBuffer::filled(grid, Rgba8::TRANSPARENT);
    for i in 0..grid.pixel_count() {
        expected.put_index(corr.target_of(i), source.get_index(i));
    }
    assert_eq!(session.frame().as_bytes(), expected.as_bytes());
    assert_eq!(sorted_colors(session.frame()), sorted_colors(&source));
}

#[test]
fn identical_seeds_replay_identical_frames() {
    let mut a = particle_session(10, 40, 99);
    let mut b = particle_session(10, 40, 99);
    a.start(Duration::ZERO).unwrap();
    b.start(Duration::ZERO).unwrap();

    for tick in 1..=90u64 {
        let t = secs(tick as f64 / 60.0);
        a.advance(t);
        b.advance(t);
        assert_eq!(a.frame().as_bytes(), b.frame().as_bytes(), "diverged at tick {tick}");
    }
}

#[test]
fn different_seeds_diverge_mid_flight() {
    let mut a = particle_session(10, 40, 1);
    let mut b = particle_session(10, 40, 2);
    a.start(Duration::ZERO).unwrap();
    b.start(Duration::ZERO).unwrap();

    let t = secs(0.5);
    a.advance(t);
    b.advance(t);
    assert_ne!(a.frame().as_bytes(), b.frame().as_bytes());
}

#[test]
fn pausing_never_changes_particle_progress() {
    // One session runs the timeline straight through; the other pauses for
    // a long gap in the middle. Frames at equal accumulated active time
    // must match byte for byte.
    let mut straight = particle_session(10, 55, 7);
    let mut gapped = particle_session(10, 55, 7);
    straight.start(Duration::ZERO).unwrap();
    gapped.start(Duration::ZERO).unwrap();

    straight.advance(secs(0.2));
    gapped.advance(secs(0.2));
    assert_eq!(straight.frame().as_bytes(), gapped.frame().as_bytes());

    gapped.pause(secs(0.2));
    gapped.advance(secs(60.0));
    gapped.resume(secs(60.0));

    straight.advance(secs(0.5));
    gapped.advance(secs(60.3));
    assert_eq!(straight.frame().as_bytes(), gapped.frame().as_bytes());

    // And both finish on the same (shifted) tick with the same frame.
    straight.advance(secs(30.0));
    gapped.advance(secs(90.0));
    assert_eq!(straight.phase(), Phase::Completed);
    assert_eq!(gapped.phase(), Phase::Completed);
    assert_eq!(straight.frame().as_bytes(), gapped.frame().as_bytes());
}

#[test]
fn settled_fraction_is_monotone() {
    let mut session = particle_session(10, 70, 21);
    session.start(Duration::ZERO).unwrap();

    let mut last = 0.0f64;
    let mut tick = 0u64;
    loop {
        tick += 1;
        let report = session.advance(secs(tick as f64 / 60.0));
        assert!(
            report.progress >= last,
            "progress regressed from {last} to {} at tick {tick}",
            report.progress
        );
        last = report.progress;
        if !report.should_continue() {
            break;
        }
    }
    assert_eq!(last, 1.0);
}

#[test]
fn mid_flight_frames_only_carry_source_colors() {
    let grid = GridSize::new(10).unwrap();
    let (source, _) = textured_pair(grid);
    let palette: std::collections::BTreeSet<[u8; 4]> = (0..grid.pixel_count())
        .map(|i| source.get_index(i).to_array())
        .collect();

    let mut session = particle_session(10, 50, 3);
    session.start(Duration::ZERO).unwrap();
    session.advance(secs(0.4));

    let frame = session.frame();
    let mut drawn = 0usize;
    for i in 0..frame.pixel_count() {
        let px = frame.get_index(i);
        if px == Rgba8::TRANSPARENT {
            continue;
        }
        drawn += 1;
        assert!(
            palette.contains(&px.to_array()),
            "cell {i} holds a color that never existed in the source"
        );
    }
    // In-flight particles can share a rounded cell, so the frame may hold
    // fewer opaque cells than particles, never more.
    assert!(drawn > 0);
    assert!(drawn <= grid.pixel_count());
}
