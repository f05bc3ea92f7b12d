//! Minimal `multipart/form-data` encoder for the file upload endpoint.

/// A form being assembled. Parts are emitted in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Form {
    parts: Vec<Part>,
}

#[derive(Debug)]
struct Part {
    name: String,
    file: Option<(String, &'static str)>,
    body: Vec<u8>,
}

impl Form {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.to_owned(),
            file: None,
            body: value.into().into_bytes(),
        });
        self
    }

    pub(crate) fn file(
        mut self,
        name: &str,
        file_name: &str,
        content_type: &'static str,
        body: &[u8],
    ) -> Self {
        self.parts.push(Part {
            name: name.to_owned(),
            file: Some((file_name.to_owned(), content_type)),
            body: body.to_vec(),
        });
        self
    }

    /// Encode the form. Returns the `Content-Type` header value and body.
    pub(crate) fn finish(self) -> (String, Vec<u8>) {
        let boundary = self.boundary();
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match &part.file {
                Some((file_name, content_type)) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n",
                            part.name
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    out.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                            .as_bytes(),
                    );
                }
            }
            out.extend_from_slice(&part.body);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={boundary}"), out)
    }

    /// Derived from a digest of every part body, then suffixed until no
    /// body contains it.
    fn boundary(&self) -> String {
        let mut ctx = md5::Context::new();
        for part in &self.parts {
            ctx.consume(&part.body);
        }
        let bodies: Vec<&[u8]> = self.parts.iter().map(|p| p.body.as_slice()).collect();
        unique_boundary(format!("metasync-{:x}", ctx.compute()), &bodies)
    }
}

fn unique_boundary(base: String, bodies: &[&[u8]]) -> String {
    let mut boundary = base.clone();
    let mut salt = 0u32;
    while bodies.iter().any(|body| occurs_in(body, boundary.as_bytes())) {
        salt += 1;
        boundary = format!("{base}-{salt}");
    }
    boundary
}

fn occurs_in(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
