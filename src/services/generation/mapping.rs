//! Mapping of raw generateContent responses to [`ModelResponse`].

use crate::types::{
    FunctionCall, FunctionResponse, GenerateContentResponse, GroundingDetail, GroundingMetadata,
    GroundingSource, GroundingSupport, ModelResponse,
};

const CANDIDATE_SEPARATOR: &str = "\n\n";

/// Builds the client-facing result.
///
/// Text is gathered from every candidate; grounding, function calls and the
/// finish reason come from the first candidate only.
pub fn to_model_response(response: &GenerateContentResponse) -> ModelResponse {
    let first = response.candidates.first();
    let first_parts = first
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default();

    let function_calls: Vec<FunctionCall> = first_parts
        .iter()
        .filter_map(|p| p.as_function_call().cloned())
        .collect();
    let function_responses: Vec<FunctionResponse> = first_parts
        .iter()
        .filter_map(|p| p.as_function_response().cloned())
        .collect();

    ModelResponse {
        text: collect_text(response),
        grounding_detail: first
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(grounding_detail),
        function_calls: non_empty(function_calls),
        function_responses: non_empty(function_responses),
        finish_reason: first.and_then(|c| c.finish_reason),
        usage: response.usage_metadata,
        model_version: response.model_version.clone(),
    }
}

fn collect_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.as_text())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(CANDIDATE_SEPARATOR)
}

fn grounding_detail(metadata: &GroundingMetadata) -> GroundingDetail {
    GroundingDetail {
        rendered_content_as_html: metadata
            .search_entry_point
            .as_ref()
            .and_then(|e| e.rendered_content.clone()),
        search_suggestions: metadata.web_search_queries.clone(),
        reliable_information: metadata
            .grounding_supports
            .as_deref()
            .map(ranked_segments),
        sources: metadata.grounding_chunks.as_ref().map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| GroundingSource {
                    domain: web.title.clone(),
                    url: web.uri.clone(),
                })
                .collect()
        }),
    }
}

/// Segment texts ordered by descending maximum confidence.
///
/// The sort is stable; supports without any score go last.
fn ranked_segments(supports: &[GroundingSupport]) -> Vec<String> {
    let mut ranked: Vec<(Option<f64>, &GroundingSupport)> =
        supports.iter().map(|s| (s.max_confidence(), s)).collect();

    ranked.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    ranked
        .into_iter()
        .filter_map(|(_, support)| support.segment.as_ref())
        .map(|segment| segment.text.clone())
        .collect()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
