use std::collections::HashMap;

use crate::domain::types::Item;

/// Okapi saturation parameter.
pub const K1: f64 = 1.5;
/// Okapi length-normalization parameter.
pub const B: f64 = 0.75;

pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Pseudo-document for an item: lowercase whitespace tokens of its name, id
/// and preferred zone.
pub fn item_document(item: &Item) -> Vec<String> {
    let mut terms = tokenize_query(&item.name);
    terms.extend(tokenize_query(&item.id));
    terms.extend(tokenize_query(&item.preferred_zone));
    terms
}

/// Smoothed inverse document frequency; always positive.
pub fn idf(term: &str, documents: &[(String, Vec<String>)]) -> f64 {
    let containing = documents
        .iter()
        .filter(|(_, terms)| terms.iter().any(|t| t == term))
        .count();
    ((documents.len() as f64 + 1.0) / (containing as f64 + 1.0)).ln() + 1.0
}

/// BM25 score per document id. Documents sharing no query term score 0.
pub fn bm25_scores(
    query_terms: &[String],
    documents: &[(String, Vec<String>)],
) -> HashMap<String, f64> {
    let total_length: usize = documents.iter().map(|(_, terms)| terms.len()).sum();
    let avg_doc_length = total_length as f64 / documents.len().max(1) as f64;

    let idf_values: HashMap<&str, f64> = query_terms
        .iter()
        .map(|term| (term.as_str(), idf(term, documents)))
        .collect();

    let mut scores = HashMap::new();
    for (doc_id, terms) in documents {
        let doc_length = terms.len() as f64;
        let mut score = 0.0;

        for term in query_terms {
            let tf = terms.iter().filter(|t| *t == term).count() as f64;
            if tf == 0.0 {
                continue;
            }
            let numerator = tf * (K1 + 1.0);
            let denominator = tf + K1 * (1.0 - B + B * doc_length / avg_doc_length);
            score += idf_values[term.as_str()] * numerator / denominator;
        }

        scores.insert(doc_id.clone(), score);
    }
    scores
}
