mod common;

use std::sync::Arc;

use common::{pdf_bytes, write_file, zip_bytes, SAMPLE_A};
use plagcheck::{
    compare, Checker, DecisionMaker, Embedder, ExtractError, ExtractionCause, MatchError,
    Normalizer, PipelineError, PlagcheckConfig, SemanticError, SimilarityEngine,
};
use tempfile::tempdir;

#[test]
fn unsupported_extension_is_rejected_before_scoring() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);
    let b = write_file(dir.path(), "b.xyz", SAMPLE_A);

    let err = compare(&a, &b, 0.7).unwrap_err();
    match err {
        PipelineError::Extract(ExtractError::UnsupportedFormat { extension }) => {
            assert_eq!(extension, "xyz");
        }
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn unsupported_extension_wins_over_missing_file() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);
    let missing = dir.path().join("never-written.rtf");

    assert!(matches!(
        compare(&a, &missing, 0.7),
        Err(PipelineError::Extract(ExtractError::UnsupportedFormat { .. }))
    ));
}

#[test]
fn missing_file_is_an_io_error_with_path() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);
    let missing = dir.path().join("missing.txt");

    let err = compare(&a, &missing, 0.7).unwrap_err();
    match &err {
        PipelineError::Extract(ExtractError::Extraction { path, source }) => {
            assert_eq!(path, &missing);
            assert!(matches!(source, ExtractionCause::Io(_)));
        }
        other => panic!("expected Extraction, got {other:?}"),
    }
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn corrupt_pdf_is_an_error_not_empty_text() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);
    let mut truncated = pdf_bytes(&[SAMPLE_A]);
    truncated.truncate(40);
    let b = write_file(dir.path(), "b.pdf", truncated);

    assert!(matches!(
        compare(&a, &b, 0.7),
        Err(PipelineError::Extract(ExtractError::Extraction {
            source: ExtractionCause::Pdf(_),
            ..
        }))
    ));
}

#[test]
fn docx_that_is_not_a_zip_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);
    let b = write_file(dir.path(), "b.docx", "plain text pretending to be docx");

    assert!(matches!(
        compare(&a, &b, 0.7),
        Err(PipelineError::Extract(ExtractError::Extraction {
            source: ExtractionCause::Zip(_),
            ..
        }))
    ));
}

#[test]
fn docx_without_document_part_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);
    let b = write_file(
        dir.path(),
        "b.docx",
        zip_bytes(&[("word/styles.xml", "<w:styles/>")]),
    );

    assert!(matches!(
        compare(&a, &b, 0.7),
        Err(PipelineError::Extract(ExtractError::Extraction {
            source: ExtractionCause::MissingPart(_),
            ..
        }))
    ));
}

#[test]
fn non_finite_threshold_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.txt", SAMPLE_A);

    for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            compare(&a, &a, threshold),
            Err(PipelineError::Match(MatchError::InvalidThreshold(_)))
        ));
    }
}

#[test]
fn invalid_config_surfaces_as_config_error() {
    let err = PlagcheckConfig::from_yaml("threshold: .nan").unwrap_err();
    let err = PipelineError::from(err);
    assert!(matches!(err, PipelineError::Config(_)));
    assert!(err.to_string().contains("configuration error"));
}

struct ExplodingEmbedder;

impl Embedder for ExplodingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, SemanticError> {
        Err(SemanticError::Inference("onnx session failed".into()))
    }

    fn model_name(&self) -> &str {
        "exploding"
    }

    fn dimension(&self) -> usize {
        4
    }
}

#[test]
fn embedding_failure_is_never_replaced_by_a_default_score() {
    let checker = Checker::new(
        Normalizer::default(),
        SimilarityEngine::new(Arc::new(ExplodingEmbedder)),
        DecisionMaker::default(),
        0.7,
    )
    .expect("checker");

    let err = checker.compare_texts(SAMPLE_A, SAMPLE_A).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Match(MatchError::Semantic(SemanticError::Inference(_)))
    ));
}
