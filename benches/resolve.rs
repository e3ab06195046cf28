//! Style resolution and composition benchmarks
//!
//! Measures the two hot paths of a session with varying:
//! - Descriptor chain depths (1, 3, 6, 12)
//! - Registered binding counts (0, 64, 256 extras)
//! - Document sizes (10, 100, 1000 paragraphs)
//!
//! Run benchmarks: `cargo bench --bench resolve`
//!
//! Compare specific groups:
//! ```
//! cargo bench --bench resolve -- "resolution_depth"
//! cargo bench --bench resolve -- "composition_throughput"
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use markflow::{Block, Composer, ElementType, StyleManager, Tree, build, defaults};
use markflow_style::{ElementPosition, SingleElementDescriptor, StylingDescriptor};

/// The built-in style set every session starts from.
fn installed_styles() -> StyleManager {
    let mut styles = StyleManager::new();
    defaults::install(&mut styles).expect("Failed to install the default styles");
    styles
}

fn element(element_type: ElementType) -> SingleElementDescriptor {
    SingleElementDescriptor {
        element_type,
        position: ElementPosition::new(0, 1),
        ..SingleElementDescriptor::default()
    }
}

/// A descriptor chain of the given depth, innermost first: a paragraph
/// under alternating list and quote containers.
fn chain(depth: usize) -> StylingDescriptor {
    const CONTAINERS: [ElementType; 3] = [
        ElementType::UnorderedListItem,
        ElementType::UnorderedList,
        ElementType::Quote,
    ];
    let mut descriptors = vec![element(ElementType::Paragraph)];
    for level in 1..depth {
        descriptors.push(element(CONTAINERS[(level - 1) % CONTAINERS.len()]));
    }
    StylingDescriptor::new(descriptors)
}

/// Generate a flat document of prose paragraphs
fn prose_blocks(count: usize) -> Vec<Block> {
    (0..count)
        .map(|index| build::paragraph(format!("Paragraph {index} with a steady line of prose.")))
        .collect()
}

/// A small document touching every block family
fn mixed_blocks() -> Vec<Block> {
    vec![
        build::heading(1, "Field Notes"),
        build::paragraph("An opening paragraph with a steady line of prose."),
        build::quote(vec![build::paragraph("A quoted aside.")]),
        build::bullet_list(vec![
            build::list_item(vec![build::paragraph("boots")]),
            build::list_item(vec![build::paragraph("lantern")]),
            build::list_item(vec![build::paragraph("rope")]),
        ]),
        build::code_block("text", "lantern: 1\nrope: 3\n"),
        build::table(
            vec![build::column(None), build::column(None)],
            vec![
                build::header_row(vec![build::cell("Item"), build::cell("Count")]),
                build::row(vec![build::cell("rope"), build::cell("3")]),
                build::row(vec![build::cell("lantern"), build::cell("1")]),
            ],
        ),
        build::heading(2, "Summary"),
        build::paragraph("A closing paragraph."),
    ]
}

/// Benchmark resolution against the built-in bindings as the element
/// sits deeper in the tree
fn benchmark_resolution_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution_depth");
    let styles = installed_styles();

    for depth in [1usize, 3, 6, 12] {
        let descriptor = chain(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter(|| styles.resolve(&descriptor));
        });
    }

    group.finish();
}

/// Benchmark how resolution scales with bindings that never match the
/// resolved element
fn benchmark_binding_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding_scaling");

    for extra in [0usize, 64, 256] {
        let mut styles = installed_styles();
        for index in 0..extra {
            let name = format!("callout-{index}");
            let style = styles.add_style(&name);
            style.borrow_mut().font.italic = Some(true);
            styles
                .for_element(ElementType::Paragraph)
                .with_ancestor_named(ElementType::CustomContainer, &name)
                .bind(&name)
                .expect("Failed to bind the style");
        }
        let descriptor = chain(3);

        group.bench_with_input(BenchmarkId::new("extra_bindings", extra), &extra, |b, _| {
            b.iter(|| styles.resolve(&descriptor));
        });
    }

    group.finish();
}

/// Benchmark full sessions with varying paragraph counts
fn benchmark_composition_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("composition_throughput");

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let blocks = prose_blocks(count);

        group.bench_with_input(BenchmarkId::new("paragraphs", count), &count, |b, _| {
            b.iter(|| {
                let mut session = Composer::new().expect("Failed to open a session");
                session.append(Tree::from_blocks(blocks.clone()));
                session.compose().expect("Failed to compose")
            });
        });
    }

    group.finish();
}

/// Benchmark a full session over a document touching lists, tables and
/// code alongside plain prose
fn benchmark_mixed_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_document");
    let blocks = mixed_blocks();
    group.throughput(Throughput::Elements(blocks.len() as u64));

    group.bench_function("full_session", |b| {
        b.iter(|| {
            let mut session = Composer::new().expect("Failed to open a session");
            session.append(Tree::from_blocks(blocks.clone()));
            session.compose().expect("Failed to compose")
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_resolution_depth,
    benchmark_binding_scaling,
    benchmark_composition_throughput,
    benchmark_mixed_document
);
criterion_main!(benches);
