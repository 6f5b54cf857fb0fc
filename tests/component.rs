use async_trait::async_trait;
use coltree::decorate::{ListItem, ParentMessageFallback, DISABLED_CLASS};
use coltree::input::parse_nodes;
use coltree::model::{CollectionTreeOptions, ContentStatusEntry, SystemSetting};
use coltree::services::{
    LanguageSelector, OrgDetailsService, Services, SessionUser, StaticOrgDetails,
};
use coltree::{CollectionTreeComponent, CollectionTreeError, TreeInputs};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

const NODES: &str = r#"{
    "identifier": "do_course",
    "name": "Course",
    "mimeType": "application/vnd.ekstep.content-collection",
    "children": [
        {
            "identifier": "do_unit1",
            "name": "Unit 1",
            "mimeType": "application/vnd.ekstep.content-collection",
            "children": [
                {"identifier": "do_pdf", "name": "Notes", "mimeType": "application/pdf"},
                {"identifier": "do_video", "name": "Lecture", "mimeType": "video/mp4"}
            ]
        },
        {
            "identifier": "do_unit2",
            "name": "Unit 2",
            "mimeType": "application/vnd.ekstep.content-collection"
        }
    ]
}"#;

const ORG_BLOB: &str = r#"[
    {"rootOrgId": "org_other", "value": "Other"},
    {"rootOrgId": "org_1", "value": "Soon", "translations": "{\"en\":\"Coming soon\",\"fr\":\"Bientôt\"}"}
]"#;

/// Holds the setting back until the test releases it.
struct GatedOrg {
    gate: Arc<Notify>,
    value: Option<String>,
}

#[async_trait]
impl OrgDetailsService for GatedOrg {
    fn root_org_id(&self) -> Option<String> {
        Some("org_1".into())
    }

    async fn coming_soon_message(&self) -> coltree::Result<SystemSetting> {
        self.gate.notified().await;
        Ok(SystemSetting {
            value: self.value.clone(),
            ..Default::default()
        })
    }
}

struct FailingOrg;

#[async_trait]
impl OrgDetailsService for FailingOrg {
    fn root_org_id(&self) -> Option<String> {
        Some("org_1".into())
    }

    async fn coming_soon_message(&self) -> coltree::Result<SystemSetting> {
        Err(CollectionTreeError::MissingSetting("contentComingSoonMsg".into()))
    }
}

fn inputs() -> TreeInputs {
    TreeInputs {
        nodes: Some(parse_nodes(NODES).unwrap()),
        options: CollectionTreeOptions {
            folder_icon: Some("fa fa-folder-o".into()),
            file_icon: "fa fa-file-o".into(),
            custom_file_icon: Default::default(),
        },
        content_status: Some(vec![ContentStatusEntry {
            content_id: "do_pdf".into(),
            status: Some(2),
        }]),
    }
}

fn services(org: Arc<dyn OrgDetailsService>) -> (Services, Arc<LanguageSelector>) {
    let languages = Arc::new(LanguageSelector::new("en", "Content coming soon"));
    let services = Services {
        user: Arc::new(SessionUser::new(false, None)),
        org,
        resources: languages.clone(),
    };
    (services, languages)
}

fn title_of(component: &CollectionTreeComponent, id: &str) -> String {
    let tree = component.decorated().unwrap();
    let node = tree.tree().find(id).unwrap();
    tree.get(node).unwrap().title.clone()
}

async fn next(component: &mut CollectionTreeComponent) -> bool {
    tokio::time::timeout(Duration::from_secs(2), component.next_event())
        .await
        .expect("event within timeout")
}

#[tokio::test]
async fn test_first_language_emission_builds_tree() {
    let (services, _languages) = services(Arc::new(StaticOrgDetails::new(None, None)));
    let (mut component, _selections) =
        CollectionTreeComponent::new(services, inputs(), ParentMessageFallback::Observed);

    assert!(component.decorated().is_none());
    component.start();
    assert!(next(&mut component).await);

    assert_eq!(component.selected_language(), Some("en"));
    assert_eq!(component.rebuild_count(), 1);
    assert_eq!(component.root_children().len(), 2);
    assert_eq!(title_of(&component, "do_unit2"), "Unit 2<span> (Content coming soon)</span>");
}

#[tokio::test]
async fn test_org_message_applies_once_resolved() {
    let gate = Arc::new(Notify::new());
    let org = Arc::new(GatedOrg {
        gate: gate.clone(),
        value: Some(ORG_BLOB.into()),
    });
    let (services, languages) = services(org);
    let (mut component, _selections) =
        CollectionTreeComponent::new(services, inputs(), ParentMessageFallback::Observed);
    component.start();
    assert!(next(&mut component).await);

    // Input changes before the org message is known are deferred
    component.update_inputs(inputs());
    assert_eq!(component.rebuild_count(), 1);

    gate.notify_one();
    assert!(next(&mut component).await);
    assert_eq!(component.coming_soon().unwrap().root_org_id, "org_1");
    assert_eq!(title_of(&component, "do_unit2"), "Unit 2<span> (Coming soon)</span>");
    assert_eq!(component.rebuild_count(), 2);

    // Now input changes rebuild immediately
    component.update_inputs(inputs());
    assert_eq!(component.rebuild_count(), 3);

    languages.select("fr");
    assert!(next(&mut component).await);
    assert_eq!(title_of(&component, "do_unit2"), "Unit 2<span> (Bientôt)</span>");

    let tree = component.decorated().unwrap();
    let unit2 = tree.get(tree.tree().find("do_unit2").unwrap()).unwrap();
    assert_eq!(unit2.extra_classes, DISABLED_CLASS);
}

#[tokio::test]
async fn test_failed_fetch_keeps_default_message() {
    let (services, languages) = services(Arc::new(FailingOrg));
    let (mut component, _selections) =
        CollectionTreeComponent::new(services, inputs(), ParentMessageFallback::Observed);
    component.start();
    assert!(next(&mut component).await);

    languages.select("fr");
    assert!(next(&mut component).await);
    assert!(component.coming_soon().is_none());
    assert_eq!(title_of(&component, "do_unit2"), "Unit 2<span> (Content coming soon)</span>");
}

#[tokio::test]
async fn test_rebuild_without_nodes_clears_tree() {
    let (services, _languages) = services(Arc::new(StaticOrgDetails::new(None, None)));
    let empty = TreeInputs {
        nodes: None,
        ..inputs()
    };
    let (mut component, _selections) =
        CollectionTreeComponent::new(services, empty, ParentMessageFallback::Observed);
    component.start();
    assert!(next(&mut component).await);

    assert!(component.decorated().is_none());
    assert!(component.root_children().is_empty());
}

#[tokio::test]
async fn test_teardown_stops_language_updates() {
    let (services, languages) = services(Arc::new(StaticOrgDetails::new(None, None)));
    let (mut component, _selections) =
        CollectionTreeComponent::new(services, inputs(), ParentMessageFallback::Observed);
    component.start();
    assert!(next(&mut component).await);
    let rebuilds = component.rebuild_count();

    component.teardown();
    component.teardown();
    assert!(component.is_torn_down());

    languages.select("fr");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(component.process_pending(), 0);
    assert!(!component.next_event().await);
    component.update_inputs(inputs());
    assert_eq!(component.rebuild_count(), rebuilds);
    assert_eq!(component.selected_language(), Some("en"));
}

#[tokio::test]
async fn test_selection_forwarding() {
    let (services, _languages) = services(Arc::new(StaticOrgDetails::new(None, None)));
    let (mut component, mut selections) =
        CollectionTreeComponent::new(services, inputs(), ParentMessageFallback::Observed);
    component.start();
    assert!(next(&mut component).await);

    let tree = component.decorated().unwrap();
    let folder = tree.get(tree.tree().find("do_unit1").unwrap()).unwrap();
    let empty_folder = tree.get(tree.tree().find("do_unit2").unwrap()).unwrap();
    let pdf_id = tree.tree().find("do_pdf").unwrap();
    let pdf = tree.get(pdf_id).unwrap();

    assert!(!component.on_node_click(folder));
    assert!(!component.on_node_click(empty_folder));
    assert!(component.on_node_click(pdf));

    let event = selections.recv().await.unwrap();
    assert_eq!(event.id, "do_pdf");
    assert_eq!(event.title, "Notes");
    assert_eq!(pdf.icon, "fa fa-file-o fancy-tree-green");

    let item = ListItem::from_node(tree, pdf_id).unwrap();
    assert!(component.on_item_select(&item));
    assert_eq!(selections.recv().await.unwrap().id, "do_pdf");
    assert!(selections.try_recv().is_err());
}
