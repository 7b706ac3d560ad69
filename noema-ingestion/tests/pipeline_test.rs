use noema_core::config::IngestionConfig;
use noema_embeddings::TfIdfProvider;
use noema_ingestion::{chunk_text, ingest_document};

// Invariant 6 + scenario S1, exercised end to end via `ingest_document`
// rather than the bare chunker, to confirm the pipeline threads byte
// offsets through to section detection without shifting them.
#[test]
fn invariant_6_chunk_boundaries_hold_through_the_full_pipeline() {
    let config = IngestionConfig::default();
    let embedder = TfIdfProvider::new(64);
    let text: String = (0..1100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();

    let doc = ingest_document(&text, "doc-boundaries", &config, &embedder).unwrap();
    assert_eq!(doc.chunks.len(), 3);
    assert_eq!(doc.chunks[0].content.len(), 512);
    assert_eq!(doc.chunks[1].content.len(), 512);
    assert_eq!(doc.chunks[2].content.len(), 176);

    let windows = chunk_text(&text, config.chunk_size, config.overlap);
    assert_eq!(windows[0].start, 0);
    let last = windows.last().unwrap();
    assert_eq!(last.start + last.content.len(), text.len());
}

// Invariant 7, across markdown with multiple sections and concepts.
#[test]
fn invariant_7_every_concept_tag_is_a_literal_substring_of_its_chunk() {
    let config = IngestionConfig::default();
    let embedder = TfIdfProvider::new(64);
    let text = "# Introduction\nThis paper discusses transformer models.\n\n# Methods\nWe use gradient descent and backpropagation to train the network.";

    let doc = ingest_document(text, "doc-sections", &config, &embedder).unwrap();
    for c in &doc.chunks {
        for tag in &c.concept_ids {
            assert!(c.content.to_lowercase().contains(tag.as_str()), "tag {tag} not found in chunk content");
        }
    }
}

#[test]
fn markdown_sections_are_assigned_by_nearest_preceding_heading() {
    // Small window so the document splits into multiple chunks and the
    // later ones land after the `# Methods` heading.
    let mut config = IngestionConfig::default();
    config.chunk_size = 20;
    config.overlap = 5;
    let embedder = TfIdfProvider::new(64);
    let text = format!(
        "# Introduction\n{}\n# Methods\n{}",
        "a".repeat(60),
        "b".repeat(60)
    );

    let doc = ingest_document(&text, "doc-md", &config, &embedder).unwrap();
    assert!(doc.chunks.len() > 2);
    // The very first chunk starts exactly at the `[Introduction]` marker,
    // so nothing precedes it and it falls back to the default section.
    assert_eq!(doc.chunks[0].section, "introduction");
    assert_eq!(doc.chunks.last().unwrap().section, "Methods");
}

#[test]
fn an_html_document_has_no_headings_and_falls_back_to_introduction() {
    let config = IngestionConfig::default();
    let embedder = TfIdfProvider::new(64);
    let doc = ingest_document("<p>Attention is a key mechanism in transformers.</p>", "doc-html", &config, &embedder).unwrap();
    assert_eq!(doc.chunks[0].section, "introduction");
    assert!(!doc.chunks[0].content.contains('<'));
}

#[test]
fn every_chunk_gets_an_embedding_of_the_configured_dimension() {
    let config = IngestionConfig::default();
    let embedder = TfIdfProvider::new(128);
    let doc = ingest_document("a modest document about neural networks and overfitting.", "doc-embed", &config, &embedder).unwrap();
    assert_eq!(doc.embeddings.len(), doc.chunks.len());
    for (id, vector) in &doc.embeddings {
        assert_eq!(vector.len(), 128);
        assert!(doc.chunks.iter().any(|c| c.embedding_id.as_deref() == Some(id.as_str())));
    }
}
