// Criterion benchmarks for CreativePlay Match

use std::collections::HashSet;

use chrono::Utc;
use creativeplay_match::core::{scoring::score_match, Matcher};
use creativeplay_match::models::{Designer, Founder, ScoringWeights};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SKILLS: &[&str] = &[
    "branding", "web design", "illustration", "figma", "react", "motion", "3d", "ux research", "typography",
    "packaging",
];

fn create_candidate(id: usize) -> Designer {
    let skills = (0..3)
        .map(|offset| SKILLS[(id + offset * 3) % SKILLS.len()])
        .collect::<Vec<_>>()
        .join(", ");

    Designer {
        id: id as i64,
        name: format!("Designer {}", id),
        email: format!("designer{}@example.com", id),
        skills: Some(skills),
        experience: Some(format!("{} years of freelance work", id % 15)),
        credits: 3,
        created_at: Utc::now(),
    }
}

fn create_founder() -> Founder {
    Founder {
        id: 0,
        name: "Founder".to_string(),
        email: "founder@example.com".to_string(),
        project: Some("Marketplace for local roasters".to_string()),
        needs: Some("Branding, Web Design, Figma, Packaging".to_string()),
        created_at: Utc::now(),
    }
}

fn bench_score_match(c: &mut Criterion) {
    let founder = create_founder();
    let designer = create_candidate(7);
    let weights = ScoringWeights::default();

    c.bench_function("score_match", |b| {
        b.iter(|| score_match(black_box(&founder), black_box(&designer), black_box(&weights)));
    });
}

fn bench_rank_designers(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_designers");
    let matcher = Matcher::with_default_weights();
    let founder = create_founder();

    for size in [100, 1_000, 10_000].iter() {
        let candidates: Vec<Designer> = (0..*size).map(create_candidate).collect();
        let excluded: HashSet<i64> = (0..*size as i64).step_by(10).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                matcher.rank_designers(
                    black_box(&founder),
                    black_box(candidates.clone()),
                    black_box(&excluded),
                    black_box(3),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score_match, bench_rank_designers);
criterion_main!(benches);
