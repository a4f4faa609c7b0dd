use std::fmt;

/// An access path captured by a [`crate::proxy::Node`].
///
/// Segments are property names or stringified array indices, in access order.
/// A path is never changed after it is built; [`Path::child`] returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    pub fn new() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// This path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Path {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Path { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Whether `segment` renders as an index: an integer with an optional leading minus.
pub fn is_index(segment: &str) -> bool {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Renders `a`, `a.b`, `a[0].b`, `f[-1].nested`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if is_index(segment) {
                write!(f, "[{}]", segment)?;
            } else if i > 0 {
                write!(f, ".{}", segment)?;
            } else {
                f.write_str(segment)?;
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path::from_segments(iter)
    }
}
