use coltree::decorate::{decorate, DecorationContext, MessageResolver, ParentMessageFallback};
use coltree::model::{CollectionTreeOptions, ContentStatusEntry, RawContentNode};
use coltree::tree::ContentTree;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const COLLECTION: &str = "application/vnd.ekstep.content-collection";

fn course(units: usize, resources: usize) -> RawContentNode {
    let children = (0..units)
        .map(|u| RawContentNode {
            identifier: format!("unit_{}", u),
            name: format!("Unit {}", u),
            mime_type: Some(COLLECTION.to_string()),
            children: (0..resources)
                .map(|r| RawContentNode {
                    identifier: format!("res_{}_{}", u, r),
                    name: format!("Resource {}", r),
                    mime_type: Some("application/pdf".to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
        .collect();

    RawContentNode {
        identifier: "course".to_string(),
        name: "Course".to_string(),
        mime_type: Some(COLLECTION.to_string()),
        children,
        ..Default::default()
    }
}

fn bench_decorate(c: &mut Criterion) {
    let raw = course(50, 40);
    let options = CollectionTreeOptions {
        folder_icon: Some("fa fa-folder-o".into()),
        file_icon: "fa fa-file-o".into(),
        custom_file_icon: Default::default(),
    };
    let status: Vec<ContentStatusEntry> = (0..500)
        .map(|i| ContentStatusEntry {
            content_id: format!("res_{}_{}", i % 50, i % 40),
            status: Some((i % 3) as u32),
        })
        .collect();
    let ctx = DecorationContext {
        options: &options,
        content_status: Some(&status),
        messages: MessageResolver {
            language: Some("en"),
            org_details: None,
            default_message: "Content coming soon",
            parent_fallback: ParentMessageFallback::Observed,
        },
    };

    c.bench_function("parse_2k_nodes", |b| b.iter(|| ContentTree::parse(black_box(&raw))));

    let tree = ContentTree::parse(&raw);
    c.bench_function("decorate_2k_nodes", |b| b.iter(|| decorate(black_box(&tree), &ctx)));
}

criterion_group!(benches, bench_decorate);
criterion_main!(benches);
