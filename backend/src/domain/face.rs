//! Face descriptor parsing and nearest-neighbour matching.
//!
//! A descriptor is a fixed-length vector of finite numbers produced on the
//! client by a face-embedding model and sent as a JSON array. Matching is a
//! top-1 search by Euclidean distance with an acceptance threshold.

use serde_json::Value;

/// Default maximum Euclidean distance accepted as the same face.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Reasons a face descriptor could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaceDescriptorError {
    /// Input is not a JSON array.
    #[error("face data must be a JSON array of numbers")]
    NotAnArray,
    /// Array was empty.
    #[error("face data must not be empty")]
    Empty,
    /// An element was not a finite number.
    #[error("face data element {index} is not a finite number")]
    InvalidElement { index: usize },
}

/// Parsed face descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDescriptor(Vec<f64>);

impl FaceDescriptor {
    /// Parse a descriptor from its JSON text form.
    ///
    /// # Examples
    /// ```
    /// use bankdesk::domain::FaceDescriptor;
    ///
    /// let descriptor = FaceDescriptor::parse("[0.25, -0.5, 1]").expect("valid");
    /// assert_eq!(descriptor.len(), 3);
    /// assert!(FaceDescriptor::parse("data:image/png;base64,AAAA").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, FaceDescriptorError> {
        let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
            return Err(FaceDescriptorError::NotAnArray);
        };
        if items.is_empty() {
            return Err(FaceDescriptorError::Empty);
        }
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_f64()
                    .filter(|value| value.is_finite())
                    .ok_or(FaceDescriptorError::InvalidElement { index })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the descriptor has no dimensions. Always false for parsed
    /// descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Euclidean distance, or `None` when dimensions differ.
    #[must_use]
    pub fn distance(&self, other: &Self) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        let sum: f64 = self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        Some(sum.sqrt())
    }
}

/// Outcome of searching enrolled faces for a probe.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceMatch<T> {
    /// No enrolled descriptor was comparable with the probe.
    NoCandidates,
    /// The closest candidate was farther than the threshold.
    NoMatch { closest_distance: f64 },
    /// The closest candidate was within the threshold.
    Matched { candidate: T, distance: f64 },
}

/// Find the enrolled candidate closest to `probe`.
///
/// Candidates whose stored data does not parse, or whose dimension differs
/// from the probe, are skipped. Ties keep the earliest candidate.
pub fn best_match<T, I>(probe: &FaceDescriptor, candidates: I, threshold: f64) -> FaceMatch<T>
where
    I: IntoIterator<Item = (T, String)>,
{
    let mut best: Option<(T, f64)> = None;
    for (candidate, raw) in candidates {
        let Some(distance) = FaceDescriptor::parse(&raw)
            .ok()
            .and_then(|descriptor| probe.distance(&descriptor))
        else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, current)| distance < *current) {
            best = Some((candidate, distance));
        }
    }

    match best {
        None => FaceMatch::NoCandidates,
        Some((candidate, distance)) if distance <= threshold => {
            FaceMatch::Matched { candidate, distance }
        }
        Some((_, distance)) => FaceMatch::NoMatch {
            closest_distance: distance,
        },
    }
}
