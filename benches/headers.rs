use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xhrnet::http::headers::{parse_raw_headers, serialize, to_header_map};
use xhrnet::http::Headers;

const RAW: &str = "accept-ranges: bytes\r\n\
age: 523\r\n\
cache-control: max-age=604800\r\n\
content-encoding: gzip\r\n\
content-length: 648\r\n\
content-type: text/html; charset=UTF-8\r\n\
date: Mon, 01 Jan 2024 00:00:00 GMT\r\n\
etag: \"3147526947\"\r\n\
expires: Mon, 08 Jan 2024 00:00:00 GMT\r\n\
last-modified: Thu, 17 Oct 2019 07:18:26 GMT\r\n\
server: ECS (nyb/1D2A)\r\n\
set-cookie: WMF-Last-Access=xxxxxxxxxxx; Path=/; HttpOnly\r\n\
set-cookie: GeoIP=xxxxxxxxxxxxxxxxxxxxxxxxxxx; Path=/; secure\r\n\
vary: Accept-Encoding\r\n\
x-cache: HIT\r\n";

fn benchmark_parse_raw_headers(c: &mut Criterion) {
    c.bench_function("parse_raw_headers", |b| {
        b.iter(|| parse_raw_headers(black_box(RAW)))
    });

    let tuples = parse_raw_headers(RAW);
    c.bench_function("to_header_map", |b| {
        b.iter(|| to_header_map(black_box(&tuples)))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut headers = Headers::new();
    headers.insert(
        "Accept",
        vec!["text/html", "application/xhtml+xml", "application/xml;q=0.9"],
    );
    headers.insert("Accept-Language", "en-GB,en;q=0.9");
    headers.insert("Cache-Control", "max-age=0");
    headers.insert("X-Requested-With", "XMLHttpRequest");

    c.bench_function("headers_serialize", |b| {
        b.iter(|| {
            let mut n = 0usize;
            serialize(black_box(&headers), |name, value| n += name.len() + value.len());
            n
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_raw_headers,
    benchmark_serialize
);
criterion_main!(benches);
