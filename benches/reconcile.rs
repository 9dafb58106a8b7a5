use archerfish::{degree, geometry::Point, geometry::Side, Controller};
use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_reconcile(c: &mut Criterion) {
    let mut controller: Controller = Controller::default();
    c.bench_function("move apparent", |b| {
        b.iter(|| controller.move_apparent(Point::new(380.0, 200.0)))
    });
    c.bench_function("set angle", |b| {
        b.iter(|| controller.set_angle(Side::Left, degree!(35.0)))
    });
    let mut locked: Controller = Controller::default();
    locked.set_coupling(true).unwrap();
    c.bench_function("move real", |b| {
        b.iter(|| locked.move_real(Point::new(420.0, 260.0)))
    });
}

criterion_group!(benches, criterion_reconcile);
criterion_main!(benches);
