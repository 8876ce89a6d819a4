use criterion::{criterion_group, criterion_main, Criterion};
use search_core::tokenizer::split_into_words;
use search_core::{DocumentStatus, SearchServer};

const WORDS: &[&str] = &[
    "white", "cat", "fluffy", "tail", "groomed", "dog", "expressive", "eyes", "starling", "eugene", "collar", "fashionable",
];

fn corpus(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| (0..12).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect::<Vec<_>>().join(" "))
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = corpus(200).join(" ");
    c.bench_function("split_into_words", |b| b.iter(|| split_into_words(&text).count()));
}

fn bench_find_top_documents(c: &mut Criterion) {
    let mut server = SearchServer::with_stop_words("and in on");
    for (id, text) in corpus(10_000).iter().enumerate() {
        server
            .add_document(id as i32, text, DocumentStatus::Actual, &[1, 2, 3])
            .expect("unique ids");
    }
    c.bench_function("find_top_documents_10k", |b| b.iter(|| server.find_top_documents("fluffy groomed cat -collar")));
}

criterion_group!(benches, bench_tokenize, bench_find_top_documents);
criterion_main!(benches);
