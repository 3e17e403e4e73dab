use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gvf_convert::{decode_attributes, parse_line, FormatTag, VariantRecords};

const GVF_LINE: &str = "chr1\tdbSNP\tSNV\t14653\t14653\t.\t+\t.\t\
    ID=rs62635297;Variant_seq=A,T;Dbxref=dbSNP_132:rs62635297;Reference_seq=C";
const GFF3_LINE: &str = "3\tDGV\tcopy_number_variation\t1000\t2000\t.\t.\t.\t\
    Copy_number=3;ID=nsv1;Name=nsv1;CNVType=gain";
const PATH: &str = "resources/example.gvf";

fn benchmark_attributes(c: &mut Criterion) {
    let column = GVF_LINE.rsplit('\t').next().unwrap_or_default();
    c.bench_function("ATTRIBUTES", |b| b.iter(|| decode_attributes(black_box(column))));
}

fn benchmark_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("LINE");
    group.bench_with_input(BenchmarkId::new("GVF", "SNV"), &GVF_LINE, |b, &line| {
        b.iter(|| parse_line(black_box(line), FormatTag::Gvf, 1))
    });
    group.bench_with_input(BenchmarkId::new("GFF3", "CNV"), &GFF3_LINE, |b, &line| {
        b.iter(|| parse_line(black_box(line), FormatTag::Gff3, 1))
    });
}

fn benchmark_file(c: &mut Criterion) {
    c.bench_with_input(BenchmarkId::new("FILE", PATH), &PATH, |b, &path| {
        b.iter(|| VariantRecords::from_path(path).unwrap().count())
    });
}

criterion_group!(benches, benchmark_attributes, benchmark_line, benchmark_file);
criterion_main!(benches);
