use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizkit_core::model::{AnswerSubmission, Choice, Difficulty, Exercise};
use quizkit_core::scoring::score;

fn make_multiple_choice(options: usize) -> Exercise {
    let mut choices = vec![Choice::correct("right")];
    choices.extend((1..options).map(|i| Choice::wrong(format!("wrong {i}"))));
    Exercise::multiple_choice(1, "Pick the right one", Difficulty::Normal, choices).unwrap()
}

fn make_fill_in_the_blank(answers: usize) -> Exercise {
    let possible = (0..answers).map(|i| format!("Answer {i}")).collect();
    Exercise::fill_in_the_blank(2, "Fill the ___", Difficulty::Normal, possible).unwrap()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    let mc = make_multiple_choice(8);
    group.bench_function("multiple_choice_hit", |b| {
        let answer = AnswerSubmission::selected(1, 0);
        b.iter(|| score(black_box(&mc), black_box(&answer)))
    });
    group.bench_function("multiple_choice_out_of_range", |b| {
        let answer = AnswerSubmission::selected(1, 1_000);
        b.iter(|| score(black_box(&mc), black_box(&answer)))
    });

    let blank = make_fill_in_the_blank(50);
    group.bench_function("fill_in_the_blank_last_of_50", |b| {
        let answer = AnswerSubmission::written(2, "  answer 49 ");
        b.iter(|| score(black_box(&blank), black_box(&answer)))
    });
    group.bench_function("fill_in_the_blank_miss", |b| {
        let answer = AnswerSubmission::written(2, "nothing");
        b.iter(|| score(black_box(&blank), black_box(&answer)))
    });

    let card = Exercise::flashcard(3, "Hola", Difficulty::Easy, "Hello").unwrap();
    group.bench_function("flashcard", |b| {
        let answer = AnswerSubmission::written(3, "HELLO");
        b.iter(|| score(black_box(&card), black_box(&answer)))
    });

    group.finish();
}

criterion_group!(benches, bench_score);
criterion_main!(benches);
