use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    http::bench_content_length_response,
    http::bench_chunked_response,
    share::bench_parse_readings,
    share::bench_get_glucose,
    share::bench_create_session
);
criterion_main!(benches);
