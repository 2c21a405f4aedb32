//! Batch normalization of many annotated texts and JSON output

use anyhow::{anyhow, Result};
use rayon::prelude::*;
use std::io::Write;

use crate::data::raw::AnnotatedText;
use crate::engine::normalizer::AnnotationNormalizer;
use crate::types::NormalizedDocument;

impl AnnotationNormalizer {
    /// Normalize records in parallel, keeping input order. On failure the
    /// error names the lowest-indexed malformed record.
    pub fn normalize_batch(&self, records: &[AnnotatedText]) -> Result<Vec<NormalizedDocument>> {
        let results: Vec<_> = records
            .par_iter()
            .map(|record| self.normalize_annotated(record))
            .collect();

        results
            .into_iter()
            .enumerate()
            .map(|(idx, result)| result.map_err(|e| anyhow!("Record {}: {}", idx, e)))
            .collect()
    }
}

/// Write documents as one JSON array followed by a newline
pub fn write_documents<W: Write>(mut writer: W, documents: &[NormalizedDocument], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, documents)?;
    } else {
        serde_json::to_writer(&mut writer, documents)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::annotators::AnnotatorSet;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn record(word: &str) -> AnnotatedText {
        let text = format!("{} runs.", word);
        let end = word.chars().count();
        serde_json::from_value(json!({
            "text": text,
            "annotation": {"sentences": [{"tokens": [
                {"word": word, "lemma": word.to_lowercase(), "characterOffsetBegin": 0, "characterOffsetEnd": end},
                {"word": "runs", "lemma": "run", "characterOffsetBegin": end + 1, "characterOffsetEnd": end + 5},
                {"word": ".", "lemma": ".", "characterOffsetBegin": end + 5, "characterOffsetEnd": end + 6}
            ]}]}
        }))
        .unwrap()
    }

    fn malformed(word: &str) -> AnnotatedText {
        let mut record = record(word);
        record.annotation.sentences[0].tokens = None;
        record
    }

    fn normalizer(list: &str) -> AnnotationNormalizer {
        AnnotationNormalizer::new(AnnotatorSet::parse_list(list))
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let words = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "Heidi"];
        let records: Vec<_> = words.iter().map(|w| record(w)).collect();
        let documents = normalizer("tokenize,ssplit").normalize_batch(&records).unwrap();

        assert_eq!(documents.len(), words.len());
        for (doc, word) in documents.iter().zip(words) {
            assert_eq!(doc.sentences[0].text, format!("{} runs.", word));
            assert_eq!(doc.sentences[0].words[0], word);
        }
    }

    #[rstest]
    #[case(vec![2], "Record 2")]
    #[case(vec![1, 3], "Record 1")]
    #[case(vec![3, 0], "Record 0")]
    fn test_batch_reports_lowest_malformed_record(#[case] bad: Vec<usize>, #[case] expected: &str) {
        let records: Vec<_> = (0..4)
            .map(|idx| if bad.contains(&idx) { malformed("Zed") } else { record("Zed") })
            .collect();
        let err = normalizer("tokenize").normalize_batch(&records).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with(expected), "{}", message);
        assert!(message.contains("sentence 0"));
    }

    #[test]
    fn test_batch_of_nothing() {
        assert!(normalizer("tokenize").normalize_batch(&[]).unwrap().is_empty());
    }

    #[rstest]
    #[case("tokenize,ssplit", "Alice")]
    #[case("tokenize,ssplit,lemma", "alice")]
    fn test_batch_uses_normalizer_annotators(#[case] list: &str, #[case] first_word: &str) {
        let documents = normalizer(list).normalize_batch(&[record("Alice")]).unwrap();
        assert_eq!(documents[0].sentences[0].words[0], first_word);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_write_documents_emits_json_array(#[case] pretty: bool) {
        let documents = normalizer("tokenize")
            .normalize_batch(&[record("Alice"), record("Bob")])
            .unwrap();
        let mut buffer = Vec::new();
        write_documents(&mut buffer, &documents, pretty).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.ends_with('\n'));
        assert_eq!(output.trim_end().lines().count() > 1, pretty);

        let value: Value = serde_json::from_str(&output).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["sentences"][0]["text"], "Bob runs.");

        let back: Vec<NormalizedDocument> = serde_json::from_str(&output).unwrap();
        assert_eq!(back, documents);
    }

    #[test]
    fn test_write_empty_batch() {
        let mut buffer = Vec::new();
        write_documents(&mut buffer, &[], false).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }
}
