use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rkpi2::{decode, encode, Endianness, Header, SampleFormat, SampleRate};

fn bench_codec(c: &mut Criterion) {
    let header = Header::new(Endianness::Little, SampleFormat::Float32, SampleRate::Hz48000, 2).unwrap();
    let raw = encode(&header);

    c.bench_function("encode_header", |b| b.iter(|| encode(black_box(&header))));
    c.bench_function("decode_header", |b| b.iter(|| decode(black_box(&raw))));
}

fn bench_read(c: &mut Criterion) {
    let header = Header::new(Endianness::Big, SampleFormat::Signed16, SampleRate::Hz44100, 2).unwrap();
    let mut buf = Vec::new();
    header.write(&mut buf).unwrap();

    c.bench_function("read_header_slice", |b| b.iter(|| Header::read(black_box(&buf[..]))));
}

criterion_group!(benches, bench_codec, bench_read);
criterion_main!(benches);
