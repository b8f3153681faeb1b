use criterion::{black_box, criterion_group, criterion_main, Criterion};
use svparse_core::arena::CompilationArena;
use svparse_core::intern::StringInterner;
use svparse_parser::Parser;

// Expression-heavy inputs covering most of the grammar
const EXPRESSIONS: &[&str] = &[
    "a + b * (c - d) / e ** 2",
    "(state == IDLE) ? next_val + 1 : {tag, payload[7:0], 4'b0000}",
    "pkg::cfg#(WIDTH)::table[index].entry(x, .mode(2), .enable)",
    "{<< 8 {header, body with [offset +: len], crc}}",
    "'{addr: base + offset, data: '{default: '0}, valid: 1'b1}",
    "obj.randomize() with { x inside {[1:100]}; y dist { [0:9] := 1, 10 :/ 2 }; }",
    "v matches tagged Valid .val &&& val > threshold ? val : fallback",
    "#10 @(posedge clk iff enable) register_q",
    "signed'(raw) * unsigned'(scale) + mytype'(bias)",
    "new [depth * 2] (initial_contents)",
];

const PROPERTIES: &[&str] = &[
    "@(posedge clk) req ##[1:4] gnt ##1 done |-> strong(ack [*2] ##1 idle)",
    "not (start and busy) or first_match(a ##1 b, cnt = cnt + 1) |=> finish",
    "if (mode) always [1:3] ok else s_eventually done",
    "accept_on (rst) valid throughout (hdr ##1 body [*0:$]) until_with eof",
];

fn bench_parse_expressions(c: &mut Criterion) {
    c.bench_function("parse_expressions", |b| {
        b.iter(|| {
            let arena = CompilationArena::new();
            let interner = StringInterner::new();
            for source in EXPRESSIONS {
                let mut parser = Parser::new(&arena, &interner, black_box(source));
                black_box(parser.parse_expression());
            }
        });
    });
}

fn bench_parse_properties(c: &mut Criterion) {
    c.bench_function("parse_properties", |b| {
        b.iter(|| {
            let arena = CompilationArena::new();
            let interner = StringInterner::new();
            for source in PROPERTIES {
                let mut parser = Parser::new(&arena, &interner, black_box(source));
                black_box(parser.parse_property_expression());
            }
        });
    });
}

criterion_group!(benches, bench_parse_expressions, bench_parse_properties);
criterion_main!(benches);
