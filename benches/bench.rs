use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paircorr::*;
use rand_pcg::Pcg64;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut Pcg64, n: usize, l: f64, is_2d: bool) -> Vec<Point>
{
    (0..n)
        .map(
            |_| [
                rng.random_range(0.0..l),
                rng.random_range(0.0..l),
                if is_2d { 0.0 } else { rng.random_range(0.0..l) }
            ]
        ).collect()
}

pub fn benchmark(c: &mut Criterion){
    let mut rng = Pcg64::seed_from_u64(23);
    let points = random_points(&mut rng, 2000, 15.0, false);
    let values: Vec<f64> = (0..points.len()).map(|_| rng.random_range(-1.0..1.0)).collect();
    let query = BruteForceQuery::new(SimulationBox::cube(15.0).unwrap(), points.clone());
    let nlist = query.query_all(&points, &QueryArgs::ball(5.0).exclude_ii(true)).unwrap();
    let mut cf = RealCorrelationFunction::new(5.0, 0.05).unwrap();

    c.bench_function(
        "bench",
        |b| b.iter(|| {
            cf.reset();
            cf.accumulate(&query, &values, &points, &values, &nlist).unwrap();
            black_box(cf.correlation());
        })
    );
}

pub fn benchmark2(c: &mut Criterion){
    let mut rng = Pcg64::seed_from_u64(23);
    let points = random_points(&mut rng, 2000, 30.0, true);
    let orientations: Vec<f64> = (0..points.len()).map(|_| rng.random_range(0.0..std::f64::consts::TAU)).collect();
    let query = BruteForceQuery::new(SimulationBox::square(30.0).unwrap(), points.clone());
    let mut pmft = PmftXY::new(4.0, 4.0, 80, 80).unwrap();
    let nlist = query.query_all(&points, &QueryArgs::ball(pmft.r_max()).exclude_ii(true)).unwrap();

    c.bench_function(
        "pmft",
        |b| b.iter(|| {
            pmft.reset();
            pmft.accumulate(&query, &orientations, &points, &nlist).unwrap();
            black_box(pmft.pcf());
        })
    );
}

criterion_group!(benches, benchmark, benchmark2);
criterion_main!(benches);
