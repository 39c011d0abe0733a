//! Benchmarks for the per-frame classification path.
//!
//! Run with: cargo bench --package repform-exercise

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use repform_core::geometry::{joint_angle_atan2_deg, joint_angle_deg};
use repform_core::{BodyPoint, Confidence, FrameTimestamp, Landmark, PoseFrame, NUM_BODY_POINTS};
use repform_exercise::{Exercise, ExerciseConfig, ExerciseKind};

/// A full frame with every landmark visible, overridden at the listed roles.
fn frame_with(points: &[(BodyPoint, (f32, f32))]) -> PoseFrame {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, Confidence::MAX); NUM_BODY_POINTS];
    for (role, (x, y)) in points {
        landmarks[*role as usize] = Landmark::new(*x, *y, Confidence::MAX);
    }
    PoseFrame::from_landmarks(landmarks)
}

fn standing_pose() -> PoseFrame {
    frame_with(&[
        (BodyPoint::LeftAnkle, (0.42, 0.90)),
        (BodyPoint::RightAnkle, (0.58, 0.90)),
        (BodyPoint::LeftKnee, (0.42, 0.75)),
        (BodyPoint::RightKnee, (0.58, 0.75)),
        (BodyPoint::LeftHip, (0.44, 0.60)),
        (BodyPoint::RightHip, (0.60, 0.60)),
        (BodyPoint::LeftShoulder, (0.44, 0.25)),
        (BodyPoint::RightShoulder, (0.60, 0.25)),
        (BodyPoint::LeftHeel, (0.41, 0.92)),
        (BodyPoint::RightHeel, (0.59, 0.92)),
        (BodyPoint::LeftFootIndex, (0.45, 0.92)),
        (BodyPoint::RightFootIndex, (0.62, 0.92)),
    ])
}

fn plank_pose() -> PoseFrame {
    frame_with(&[
        (BodyPoint::LeftShoulder, (0.30, 0.60)),
        (BodyPoint::RightShoulder, (0.32, 0.60)),
        (BodyPoint::LeftElbow, (0.30, 0.75)),
        (BodyPoint::RightElbow, (0.32, 0.75)),
        (BodyPoint::LeftWrist, (0.30, 0.75)),
        (BodyPoint::RightWrist, (0.32, 0.75)),
        (BodyPoint::LeftHip, (0.55, 0.61)),
        (BodyPoint::RightHip, (0.57, 0.61)),
        (BodyPoint::LeftAnkle, (0.80, 0.62)),
        (BodyPoint::RightAnkle, (0.82, 0.62)),
    ])
}

/// Benchmark the two joint-angle formulations head to head.
fn bench_geometry_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("Geometry Kernel");
    let a = (0.31, 0.42);
    let vertex = (0.55, 0.61);
    let p = (0.72, 0.33);

    group.bench_function("joint_angle_acos", |b| {
        b.iter(|| joint_angle_deg(black_box(a), black_box(vertex), black_box(p)));
    });
    group.bench_function("joint_angle_atan2", |b| {
        b.iter(|| joint_angle_atan2_deg(black_box(a), black_box(vertex), black_box(p)));
    });

    group.finish();
}

/// Benchmark one classification step for each exercise family.
fn bench_frame_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Frame Classification");
    let config = ExerciseConfig::default();
    let standing = standing_pose();
    let plank = plank_pose();

    for kind in [
        ExerciseKind::Squat,
        ExerciseKind::Pushup,
        ExerciseKind::JumpingJack,
        ExerciseKind::WallSlide,
        ExerciseKind::Plank,
    ] {
        let frame = if kind.is_hold_based() { &plank } else { &standing };
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("process_frame", kind.name()),
            frame,
            |b, frame| {
                let mut exercise = Exercise::new(kind, &config);
                let mut t = 0.0f64;
                b.iter(|| {
                    t += 0.033;
                    exercise.process_frame(black_box(frame), FrameTimestamp::from_seconds(t))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a sustained stream of alternating squat frames, the worst case
/// for the debounce machinery.
fn bench_rep_cycle_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rep Cycle Stream");
    let config = ExerciseConfig::default();
    let standing = standing_pose();

    group.throughput(Throughput::Elements(60));
    group.bench_function("sixty_frames", |b| {
        b.iter(|| {
            let mut exercise = Exercise::new(ExerciseKind::Squat, &config);
            for i in 0..60 {
                exercise.process_frame(
                    black_box(&standing),
                    FrameTimestamp::from_seconds(i as f64 * 0.033),
                );
            }
            exercise.total_reps()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_geometry_kernel,
    bench_frame_classification,
    bench_rep_cycle_stream,
);
criterion_main!(benches);
