use bytes::Bytes;

/// Request to store a blob
#[derive(Debug, Clone)]
pub struct BlobPut {
    pub filename: String,
    pub content_type: String,
    pub body: Bytes,
}

impl BlobPut {
    pub fn new<F, C, B>(filename: F, content_type: C, body: B) -> Self
    where
        F: Into<String>,
        C: Into<String>,
        B: Into<Bytes>,
    {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.body.len() as u64
    }
}
