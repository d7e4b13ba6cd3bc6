//! Ordered, deduplicated set of images picked for upload, each with a live preview URL

/// Allocates and releases preview URLs for picked files
pub trait PreviewUrls {
    type Blob: Clone;

    fn create(&self, blob: &Self::Blob) -> Option<String>;
    fn revoke(&self, url: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage<B> {
    pub file: B,
    pub name: String,
    pub size: u64,
    pub preview_url: String,
}

impl<B> SelectedImage<B> {
    /// Two picks of the same file share this key
    pub fn identity(&self) -> (&str, u64) {
        (&self.name, self.size)
    }
}

/// Every entry owns exactly one preview URL. URLs are revoked when their
/// entry leaves the collection and when the collection is dropped.
pub struct ImageSelection<P: PreviewUrls> {
    previews: P,
    entries: Vec<SelectedImage<P::Blob>>,
}

impl<P: PreviewUrls> ImageSelection<P> {
    pub fn new(previews: P) -> Self {
        Self {
            previews,
            entries: Vec::new(),
        }
    }

    /// Append files not already present. Returns how many were added.
    pub fn add_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = (P::Blob, String, u64)>,
    {
        let mut added = 0;
        for (file, name, size) in files {
            if self.contains(&name, size) {
                continue;
            }
            let Some(preview_url) = self.previews.create(&file) else {
                log::warn!("Could not create a preview for {}", name);
                continue;
            };
            self.entries.push(SelectedImage {
                file,
                name,
                size,
                preview_url,
            });
            added += 1;
        }
        added
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(index);
        self.previews.revoke(&entry.preview_url);
        true
    }

    pub fn clear(&mut self) {
        for entry in self.entries.drain(..) {
            self.previews.revoke(&entry.preview_url);
        }
    }

    /// Drop the current entries and start over with `files`
    pub fn replace<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = (P::Blob, String, u64)>,
    {
        self.clear();
        self.add_files(files)
    }

    pub fn contains(&self, name: &str, size: u64) -> bool {
        self.entries.iter().any(|e| e.identity() == (name, size))
    }

    pub fn entries(&self) -> &[SelectedImage<P::Blob>] {
        &self.entries
    }

    pub fn files(&self) -> Vec<P::Blob> {
        self.entries.iter().map(|e| e.file.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: PreviewUrls> Drop for ImageSelection<P> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Browser object URLs (`URL.createObjectURL`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlPreviews;

impl PreviewUrls for ObjectUrlPreviews {
    type Blob = web_sys::File;

    fn create(&self, blob: &web_sys::File) -> Option<String> {
        web_sys::Url::create_object_url_with_blob(blob)
            .map_err(|e| log::error!("createObjectURL failed: {:?}", e))
            .ok()
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = web_sys::Url::revoke_object_url(url) {
            log::error!("revokeObjectURL failed: {:?}", e);
        }
    }
}

/// Files picked in an `<input type="file">`, with their identity data
pub fn picked_files(input: &web_sys::HtmlInputElement) -> Vec<(web_sys::File, String, u64)> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| {
            let name = file.name();
            let size = file.size() as u64;
            (file, name, size)
        })
        .collect()
}

#[cfg(test)]
pub mod fake {
    use super::PreviewUrls;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Counts live preview URLs
    #[derive(Debug, Clone, Default)]
    pub struct FakePreviews {
        pub live: Rc<RefCell<HashSet<String>>>,
        next: Rc<Cell<u32>>,
    }

    impl FakePreviews {
        pub fn outstanding(&self) -> usize {
            self.live.borrow().len()
        }
    }

    impl PreviewUrls for FakePreviews {
        type Blob = String;

        fn create(&self, blob: &String) -> Option<String> {
            let n = self.next.get() + 1;
            self.next.set(n);
            let url = format!("blob:{}#{}", blob, n);
            self.live.borrow_mut().insert(url.clone());
            Some(url)
        }

        fn revoke(&self, url: &str) {
            assert!(self.live.borrow_mut().remove(url), "double revoke of {}", url);
        }
    }
}
