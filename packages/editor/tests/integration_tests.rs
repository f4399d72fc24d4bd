//! Integration tests for editor crate

use pagecraft_editor::{
    from_json, serialize, to_json, BlockRegistry, DocumentError, EditSession, EditorError, FilePageStore,
    MemoryPageStore, Mutation, NodeId, PageKey, PageStore, Props, SerializeOptions, SerializedNode, Template,
    MAX_DEPTH,
};
use serde_json::json;

fn props(value: serde_json::Value) -> Props {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_document_lifecycle() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FilePageStore::new(dir.path());
    let key = PageKey::new("funzone", "home");

    // Create from a template
    let mut session = EditSession::from_template(key.clone(), Template::Landing, BlockRegistry::builtin())?;
    assert_eq!(session.document().version(), 0);
    assert!(session.is_dirty());

    // Edit
    let root = session.document().root_id().clone();
    let hero = session.document().children_of(&root)?[0].clone();
    session.apply(Mutation::PatchProps {
        node_id: hero.clone(),
        props: props(json!({ "title": "Bounce castles for every party" })),
    })?;

    // Save and reopen
    session.save(&store).await?;
    assert!(!session.is_dirty());

    let reopened = EditSession::open(&store, key, BlockRegistry::builtin()).await?;
    assert_eq!(reopened.document().len(), session.document().len());
    assert_eq!(
        reopened.document().node(&hero)?.props["title"],
        json!("Bounce castles for every party")
    );
    assert!(!reopened.is_dirty());
    Ok(())
}

#[tokio::test]
async fn test_reload_discards_unsaved_edits() -> anyhow::Result<()> {
    let store = MemoryPageStore::new();
    let key = PageKey::new("funzone", "book");
    let mut session = EditSession::from_template(key, Template::Booking, BlockRegistry::builtin())?;
    session.save(&store).await?;
    let saved_len = session.document().len();

    let root = session.document().root_id().clone();
    session.apply(Mutation::AddNode {
        parent_id: root,
        block_type: "Spacer".to_string(),
        index: None,
        props: None,
        node_id: None,
    })?;
    assert!(session.is_dirty());

    session.reload(&store).await?;

    assert_eq!(session.document().len(), saved_len);
    assert!(!session.is_dirty());
    assert!(!session.history().can_undo());
    Ok(())
}

#[tokio::test]
async fn test_reload_keeps_document_when_page_is_corrupt() -> anyhow::Result<()> {
    let store = MemoryPageStore::new();
    let key = PageKey::new("funzone", "party");
    let mut session = EditSession::from_template(key.clone(), Template::Party, BlockRegistry::builtin())?;
    let before = session.document().clone();

    // Someone stored a page using a block this build does not know
    let foreign: SerializedNode = serde_json::from_value(json!({
        "blockType": "Container",
        "props": {},
        "children": [{ "blockType": "Carousel3D", "props": {} }]
    }))?;
    store.save(&key, &foreign).await?;

    let result = session.reload(&store).await;

    assert!(matches!(result, Err(EditorError::Document(_))));
    assert_eq!(session.document(), &before);
    Ok(())
}

#[tokio::test]
async fn test_reload_missing_page() -> anyhow::Result<()> {
    let store = MemoryPageStore::new();
    let mut session = EditSession::from_template(
        PageKey::new("funzone", "draft"),
        Template::Blank,
        BlockRegistry::builtin(),
    )?;

    let result = session.reload(&store).await;
    assert!(matches!(result, Err(EditorError::PageNotFound(_))));
    assert_eq!(session.document().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_saved_file_is_plain_nested_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FilePageStore::new(dir.path());
    let mut session = EditSession::from_template(
        PageKey::new("funzone", "landing"),
        Template::Landing,
        BlockRegistry::builtin(),
    )?;
    session.save(&store).await?;

    let json = std::fs::read_to_string(dir.path().join("funzone").join("landing.json"))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["blockType"], json!("Container"));
    assert_eq!(value["children"][0]["blockType"], json!("Hero"));
    assert!(value["children"][1].get("children").is_none());

    // The stored file loads on its own, without the session
    let doc = from_json(&json, BlockRegistry::builtin())?;
    assert_eq!(doc.len(), session.document().len());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_sessions_on_separate_pages() -> anyhow::Result<()> {
    let store = std::sync::Arc::new(MemoryPageStore::new());

    let mut handles = Vec::new();
    for page in ["home", "about", "contact"] {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let mut session = EditSession::from_template(
                PageKey::new("funzone", page),
                Template::Landing,
                BlockRegistry::builtin(),
            )?;
            session.save(store.as_ref()).await?;
            Ok::<_, EditorError>(())
        }));
    }
    for handle in handles {
        handle.await??;
    }

    assert_eq!(store.len().await, 3);
    Ok(())
}

fn add(session: &mut EditSession, parent_id: &NodeId, block_type: &str, props: Option<Props>) -> Result<NodeId, EditorError> {
    let result = session.apply(Mutation::AddNode {
        parent_id: parent_id.clone(),
        block_type: block_type.to_string(),
        index: None,
        props,
        node_id: None,
    })?;
    Ok(result.node_id.unwrap())
}

/// Containers nested down to the deepest allowed level, with a booking form
/// (nested list props) at the bottom
fn deepest_page(key: PageKey) -> anyhow::Result<EditSession> {
    let mut session = EditSession::from_template(key, Template::Blank, BlockRegistry::builtin())?;
    let mut parent = session.document().root_id().clone();
    for _ in 0..MAX_DEPTH - 1 {
        parent = add(&mut session, &parent, "Container", None)?;
    }
    add(
        &mut session,
        &parent,
        "BookingForm",
        Some(props(json!({
            "services": [{ "name": "Deluxe", "price": 399, "duration": 180, "extras": ["cake", "balloons"] }]
        }))),
    )?;
    Ok(session)
}

#[tokio::test]
async fn test_deepest_page_saves_and_reopens() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let file_store = FilePageStore::new(dir.path());
    let memory_store = MemoryPageStore::new();
    let key = PageKey::new("funzone", "deep");

    let mut session = deepest_page(key.clone())?;
    let expected = serialize(session.document(), &SerializeOptions::default());
    assert_eq!(expected.count(), MAX_DEPTH + 1);

    session.save(&file_store).await?;
    session.save(&memory_store).await?;

    for reopened in [
        EditSession::open(&file_store, key.clone(), BlockRegistry::builtin()).await?,
        EditSession::open(&memory_store, key.clone(), BlockRegistry::builtin()).await?,
    ] {
        assert_eq!(serialize(reopened.document(), &SerializeOptions::default()), expected);
    }

    let json = to_json(session.document(), &SerializeOptions::default())?;
    assert_eq!(from_json(&json, BlockRegistry::builtin())?.len(), MAX_DEPTH + 1);
    Ok(())
}

#[tokio::test]
async fn test_nesting_past_the_limit_is_rejected() -> anyhow::Result<()> {
    let mut session = deepest_page(PageKey::new("funzone", "deep"))?;
    let root = session.document().root_id().clone();
    let levels = session.history().undo_levels();

    // The form sits at the limit; a Container in its place cannot take a child
    let bottom = session.document().descendants(&root)?.last().unwrap().clone();
    let bottom_parent = session.document().parent_of(&bottom)?.unwrap().clone();
    let result = add(&mut session, &bottom_parent, "Container", None)
        .and_then(|container| add(&mut session, &container, "Text", None));

    assert!(matches!(
        result,
        Err(EditorError::Document(DocumentError::TooDeep { max: MAX_DEPTH, .. }))
    ));
    assert_eq!(session.history().undo_levels(), levels + 1);
    Ok(())
}

#[test]
fn test_persisted_page_deeper_than_limit_is_rejected() {
    let mut page = json!({ "blockType": "Text", "props": { "text": "bottom" } });
    for _ in 0..MAX_DEPTH + 5 {
        page = json!({ "blockType": "Container", "props": {}, "children": [page] });
    }

    let result = from_json(&page.to_string(), BlockRegistry::builtin());
    assert!(matches!(result, Err(DocumentError::TooDeep { .. })));
}
