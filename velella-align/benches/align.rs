use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use velella_align::{align, AlignParams, ScoreModel, ScoreScheme};

fn random_protein(len: usize) -> Vec<u8> {
    let residues = b"ARNDCQEGHILKMFPSTWYV";
    // Deterministic pseudo-random for reproducibility
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(residues[((state >> 33) % 20) as usize]);
    }
    seq
}

fn mutate_protein(seq: &[u8], rate: f64) -> Vec<u8> {
    let residues = b"ARNDCQEGHILKMFPSTWYV";
    let mut out = seq.to_vec();
    let mut state: u64 = 137;
    for b in out.iter_mut() {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = (state >> 33) as f64 / (u32::MAX as f64);
        if r < rate {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *b = residues[((state >> 33) % 20) as usize];
        }
    }
    out
}

fn bench_identity(c: &mut Criterion) {
    let params = AlignParams::default();
    let mut group = c.benchmark_group("identity");

    for &len in &[100, 1000] {
        let s1 = random_protein(len);
        let s2 = mutate_protein(&s1, 0.1);

        group.bench_with_input(BenchmarkId::new("unbounded", len), &len, |b, _| {
            b.iter(|| align(black_box(&s1), black_box(&s2), &ScoreScheme::identity(), &params))
        });

        let windowed = AlignParams {
            gap_open: 10,
            gap_extend: 1,
            window: 16,
        };
        group.bench_with_input(BenchmarkId::new("window16", len), &len, |b, _| {
            b.iter(|| {
                align(
                    black_box(&s1),
                    black_box(&s2),
                    &ScoreScheme::identity(),
                    &windowed,
                )
            })
        });
    }

    group.finish();
}

fn bench_blosum62(c: &mut Criterion) {
    let model = ScoreModel::blosum62();
    let scheme = ScoreScheme::matrix(&model);
    let params = AlignParams::default();

    let mut group = c.benchmark_group("blosum62");

    for &len in &[100, 500] {
        let s1 = random_protein(len);
        let s2 = mutate_protein(&s1, 0.2);

        group.bench_with_input(BenchmarkId::new("nw", len), &len, |b, _| {
            b.iter(|| align(black_box(&s1), black_box(&s2), &scheme, &params))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_identity, bench_blosum62);
criterion_main!(benches);
