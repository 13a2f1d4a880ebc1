use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use regaut::automaton::subset_construction;
use regaut::regex::compile;
use regaut::{Alphabet, RegexAst};
use std::hint::black_box;

// (a|b)*a(a|b){n}: the textbook case where the DFA grows as 2^(n+1)
fn nth_from_last(n: usize) -> RegexAst {
    let any = || RegexAst::alt([RegexAst::literal('a'), RegexAst::literal('b')]);
    let mut parts = vec![RegexAst::star(any()), RegexAst::literal('a')];
    parts.extend((0..n).map(|_| any()));
    RegexAst::seq(parts)
}

fn simple_benchmarks(c: &mut Criterion) {
    let alphabet = Alphabet::from("ab");
    let ast = nth_from_last(3);

    c.bench_function("compile_nfa", |b| b.iter(|| compile(black_box(&ast))));

    let nfa = compile(&ast).expect("valid expression");
    c.bench_function("subset_construction", |b| {
        b.iter(|| subset_construction(black_box(&nfa), &alphabet))
    });

    let dfa = subset_construction(&nfa, &alphabet).expect("valid nfa");
    let word: String = "ab".repeat(512);
    c.bench_function("recognize_1k", |b| b.iter(|| dfa.recognize(black_box(&word))));
}

fn scaling_benchmark(c: &mut Criterion) {
    let alphabet = Alphabet::from("ab");
    let mut group = c.benchmark_group("nth_from_last");
    for n in [1usize, 2, 4, 6, 8] {
        let ast = nth_from_last(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ast, |b, ast| {
            b.iter(|| regaut::compile_dfa(ast, &alphabet).expect("valid expression"))
        });
    }
    group.finish();
}

criterion_group!(benches, simple_benchmarks, scaling_benchmark);
criterion_main!(benches);
