/// Kind of media a reference points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Parse a free-form type tag. Anything other than `video` is an image.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// Derive the references to sample colors from.
///
/// Videos are sampled through a single still of their first frame; images are
/// used as-is.
pub fn source_urls(reference: &str, kind: MediaKind) -> Vec<String> {
    match kind {
        MediaKind::Image => vec![reference.to_string()],
        MediaKind::Video => vec![video_frame_reference(reference)],
    }
}

/// `https://cdn/v/clip.mp4` becomes `https://cdn/v/clip.jpg?start_offset=0`.
pub fn video_frame_reference(reference: &str) -> String {
    format!("{}.jpg?start_offset=0", strip_extension(reference))
}

/// Remove a trailing `.ext` from the last path segment, if there is one.
fn strip_extension(reference: &str) -> &str {
    match reference.rfind('.') {
        Some(idx) => {
            let ext = &reference[idx + 1..];
            if ext.is_empty() || ext.contains('/') {
                reference
            } else {
                &reference[..idx]
            }
        }
        None => reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_uses_reference_unchanged() {
        let url = "https://cdn.example.com/posts/cover.png";
        assert_eq!(source_urls(url, MediaKind::Image), vec![url.to_string()]);
    }

    #[test]
    fn video_maps_to_single_first_frame() {
        let sources = source_urls("https://stream.example.com/abc/clip.mp4", MediaKind::Video);
        assert_eq!(
            sources,
            vec!["https://stream.example.com/abc/clip.jpg?start_offset=0".to_string()]
        );
    }

    #[test]
    fn video_without_extension_keeps_path() {
        assert_eq!(
            video_frame_reference("https://stream.example.com/abc/clip"),
            "https://stream.example.com/abc/clip.jpg?start_offset=0"
        );
    }

    #[test]
    fn only_last_extension_is_stripped() {
        assert_eq!(
            video_frame_reference("/media/archive.tar.gz"),
            "/media/archive.tar.jpg?start_offset=0"
        );
    }

    #[test]
    fn trailing_dot_is_kept() {
        assert_eq!(video_frame_reference("clip."), "clip..jpg?start_offset=0");
    }

    #[test]
    fn tag_parsing_defaults_to_image() {
        assert_eq!(MediaKind::from_tag("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_tag(" VIDEO "), MediaKind::Video);
        assert_eq!(MediaKind::from_tag("image"), MediaKind::Image);
        assert_eq!(MediaKind::from_tag("gif"), MediaKind::Image);
        assert_eq!(MediaKind::default(), MediaKind::Image);
    }
}
