use sha2::{Digest, Sha256};

/// Size and digest of one page source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDigest {
    pub len: usize,
    pub sha256: String,
}

impl SourceDigest {
    pub fn of(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        Self {
            len: text.len(),
            sha256: format!("{:x}", hasher.finalize()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffResult {
    pub identical: bool,
    pub len_delta: isize,
    pub left: SourceDigest,
    pub right: SourceDigest,
}

/// Byte-for-byte comparison of two page sources
pub fn diff(left: &str, right: &str) -> DiffResult {
    let left_digest = SourceDigest::of(left);
    let right_digest = SourceDigest::of(right);

    DiffResult {
        identical: left.as_bytes() == right.as_bytes(),
        len_delta: right_digest.len as isize - left_digest.len as isize,
        left: left_digest,
        right: right_digest,
    }
}
