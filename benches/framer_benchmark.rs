//! Throughput benchmarks for the stream pipeline
//!
//! Measures framing alone and full dispatch for answers of different sizes
//! delivered in different chunk sizes.
//! Run with: cargo bench

use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qachat::sse::SseFramer;
use qachat::stream::{ChatStreamItem, StreamDispatcher};

/// Generate a realistic answer body with the given number of fragments
fn generate_stream(fragments: usize) -> Vec<u8> {
    let mut body = String::from("event: session\ndata: {\"sessionId\":\"bench-session\"}\n\n");
    for i in 0..fragments {
        body.push_str(&format!("event: message\ndata: 第{}段回答 with some text \n\n", i));
    }
    body.push_str("event: done\ndata: {\"conversationId\":1,\"category\":\"general\"}\n\n");
    body.into_bytes()
}

/// Benchmark framing only
fn bench_framer(c: &mut Criterion) {
    let mut group = c.benchmark_group("framer");

    for chunk_size in [16, 256, 4096].iter() {
        let body = generate_stream(500);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut framer = SseFramer::new();
                    let mut frames = 0;
                    for chunk in body.chunks(*chunk_size) {
                        frames += framer.feed(black_box(chunk)).len();
                    }
                    black_box(frames)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark framing, decoding, correlation and delivery
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for fragments in [10, 100, 1000].iter() {
        let body = generate_stream(*fragments);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_fragments", fragments)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut dispatcher = StreamDispatcher::new(VecDeque::<ChatStreamItem>::new());
                    for chunk in body.chunks(1024) {
                        dispatcher.feed(black_box(chunk));
                    }
                    dispatcher.finish();
                    black_box(dispatcher.into_sink().len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_framer, bench_dispatch);
criterion_main!(benches);
