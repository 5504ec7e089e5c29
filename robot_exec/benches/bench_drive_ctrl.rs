//! # Drive Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use robot_lib::drive_ctrl::{DriveCtrl, InputData, Params, StickVector};
use util::module::State;

fn drive_ctrl_benchmark(c: &mut Criterion) {
    // Stick forward and to the right with some rotation, robot turned
    let input = InputData {
        left: StickVector::new(0.4, 0.8, 0.0),
        right: StickVector::new(0.3, 0.0, 0.0),
        heading_deg: 37.0,
    };

    let mut field_centric = DriveCtrl::new(Params::default());

    c.bench_function("DriveCtrl::proc::field_centric", |b| {
        b.iter(|| field_centric.proc(black_box(&input)).unwrap())
    });

    let mut robot_centric = DriveCtrl::new(Params {
        normalise_robot_centric: true,
        ..Default::default()
    });
    robot_centric.robot_centric();

    c.bench_function("DriveCtrl::proc::robot_centric", |b| {
        b.iter(|| robot_centric.proc(black_box(&input)).unwrap())
    });
}

criterion_group!(benches, drive_ctrl_benchmark);
criterion_main!(benches);
