//! Ordering and empty-skip behaviour of the batch document pipeline.

mod support;

use nlp_bridge::providers::{AnnotatedDoc, LanguageModel};
use nlp_bridge::{BatchDocumentPipeline, IndexedText};
use rstest::rstest;
use support::RecordingModel;

fn indexed(texts: &[&str]) -> Vec<IndexedText> {
    texts
        .iter()
        .enumerate()
        .map(|(position, text)| (position, (*text).to_owned()))
        .collect()
}

#[rstest]
#[case(&["a", "", "b", "", "", "c"])]
#[case(&["", "", "x"])]
#[case(&["only", "content", "here"])]
#[case(&["dup", "", "dup", "dup"])]
#[case(&["trailing", "", ""])]
fn output_positions_match_input(#[case] texts: &[&str]) {
    let model = RecordingModel::new();
    let docs = BatchDocumentPipeline::new(&model)
        .with_batch_size(2)
        .run(indexed(texts))
        .unwrap_or_else(|e| panic!("pipeline failed: {e}"));

    let positions: Vec<_> = docs.iter().map(|(p, _)| *p).collect();
    assert_eq!(positions, (0..texts.len()).collect::<Vec<_>>());

    for ((_, doc), text) in docs.iter().zip(texts) {
        let isolated = if text.is_empty() {
            model.empty_doc()
        } else {
            model
                .inner
                .annotate(text)
                .unwrap_or_else(|e| panic!("annotate failed: {e}"))
        };
        assert_eq!(doc, &isolated);
    }

    let content: Vec<String> = texts
        .iter()
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect();
    assert_eq!(model.batches(), vec![content]);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(25)]
fn all_empty_input_skips_the_model(#[case] count: usize) {
    let model = RecordingModel::new();
    let texts = vec![""; count];
    let docs = BatchDocumentPipeline::new(&model)
        .run(indexed(&texts))
        .unwrap_or_else(|e| panic!("pipeline failed: {e}"));
    assert_eq!(docs.len(), count);
    assert!(docs.iter().all(|(_, doc)| doc.is_empty()));
    assert!(model.batches().is_empty());
}

#[test]
fn large_collections_use_a_single_batched_call() {
    let model = RecordingModel::new();
    let texts: Vec<IndexedText> = (0..500)
        .map(|i| (i, if i % 3 == 0 { String::new() } else { format!("text {i}") }))
        .collect();
    let docs = BatchDocumentPipeline::new(&model)
        .run(texts)
        .unwrap_or_else(|e| panic!("pipeline failed: {e}"));
    assert_eq!(docs.len(), 500);
    assert_eq!(model.batches().len(), 1);
    assert!(docs.iter().all(|(p, doc)| doc.is_empty() == (p % 3 == 0)));
}
