//! Image, image & text, linked images, gallery and video blocks

use serde::{Deserialize, Serialize};

use super::{encode, num_prop, str_prop, Align, BlockSchema, ListSpec, ALIGN_OPTIONS};
use crate::core::settings::{FieldConstraints, ListEditor, SettingsForm};
use crate::core::style::{px, style, StyleMap};
use crate::core::{new_item_id, BlockType, PropValue};

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// Single image, optionally linked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub src: Option<String>,
    pub alt: Option<String>,
    /// Width as a percentage of the page column
    pub width: Option<f64>,
    pub link: Option<String>,
    pub rounded: Option<bool>,
    pub align: Option<Align>,
}

impl ImageProps {
    pub fn defaults() -> Self {
        Self {
            src: Some(String::new()),
            alt: Some("Image".into()),
            width: Some(100.0),
            link: Some(String::new()),
            rounded: Some(false),
            align: Some(Align::Center),
        }
    }
}

fn image_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&ImageProps::defaults())
}

fn image_settings() -> SettingsForm {
    SettingsForm::new()
        .image("src", "Image")
        .input("alt", "Alt text")
        .slider("width", "Width", FieldConstraints::range(10.0, 100.0).with_step(5.0).with_unit("%"))
        .url("link", "Link")
        .checkbox("rounded", "Rounded corners")
        .select("align", "Alignment", ALIGN_OPTIONS)
}

fn image_layout(props: &PropValue) -> StyleMap {
    let mut styles = StyleMap::new();
    if let Some(align) = str_prop(props, "align") {
        styles.insert("textAlign".into(), align.into());
    }
    styles
}

pub static IMAGE: BlockSchema = BlockSchema {
    block_type: BlockType::Image,
    defaults: image_defaults,
    lists: &[],
    settings: image_settings,
    layout: image_layout,
};

// ---------------------------------------------------------------------------
// Image & Text
// ---------------------------------------------------------------------------

/// Image beside (or above) a block of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTextProps {
    pub image: Option<ImageTextImage>,
    pub text: Option<ImageTextText>,
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTextImage {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub position: Option<ImagePosition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTextText {
    pub content: Option<String>,
    pub align: Option<Align>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImagePosition {
    Left,
    Right,
    Top,
}

impl ImageTextProps {
    pub fn defaults() -> Self {
        Self {
            image: Some(ImageTextImage {
                src: Some(String::new()),
                alt: Some("Image".into()),
                position: Some(ImagePosition::Left),
            }),
            text: Some(ImageTextText {
                content: Some("Describe the picture.".into()),
                align: Some(Align::Left),
            }),
            gap: Some(16.0),
        }
    }
}

fn image_text_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&ImageTextProps::defaults())
}

fn image_text_settings() -> SettingsForm {
    SettingsForm::new()
        .image("image.src", "Image")
        .input("image.alt", "Alt text")
        .select("image.position", "Image position", &["left", "right", "top"])
        .textarea("text.content", "Text")
        .select("text.align", "Text alignment", ALIGN_OPTIONS)
        .slider("gap", "Spacing", FieldConstraints::range(0.0, 64.0).with_step(4.0).with_unit("px"))
}

fn image_text_layout(props: &PropValue) -> StyleMap {
    let position = props.get("image").and_then(|image| str_prop(image, "position"));
    let direction = match position {
        Some("right") => "row-reverse",
        Some("top") => "column",
        _ => "row",
    };
    let mut styles = style([("display", "flex"), ("flexDirection", direction)]);
    if let Some(gap) = num_prop(props, "gap") {
        styles.insert("gap".into(), px(gap));
    }
    styles
}

pub static IMAGE_TEXT: BlockSchema = BlockSchema {
    block_type: BlockType::ImageText,
    defaults: image_text_defaults,
    lists: &[],
    settings: image_text_settings,
    layout: image_text_layout,
};

// ---------------------------------------------------------------------------
// Linked images
// ---------------------------------------------------------------------------

/// Grid of images that each link somewhere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesLinkProps {
    pub images: Option<Vec<LinkedImage>>,
    pub columns: Option<u32>,
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedImage {
    pub id: String,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub href: Option<String>,
}

impl LinkedImage {
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            src: Some(String::new()),
            alt: Some("Image".into()),
            href: Some(String::new()),
        }
    }
}

impl ImagesLinkProps {
    pub fn defaults() -> Self {
        Self {
            images: Some(vec![LinkedImage::new(), LinkedImage::new()]),
            columns: Some(2),
            gap: Some(8.0),
        }
    }
}

fn images_link_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&ImagesLinkProps::defaults())
}

fn new_linked_image() -> Result<PropValue, serde_json::Error> {
    encode(&LinkedImage::new())
}

fn images_link_settings() -> SettingsForm {
    SettingsForm::new()
        .number("columns", "Columns", FieldConstraints::range(1.0, 4.0).with_step(1.0))
        .slider("gap", "Spacing", FieldConstraints::range(0.0, 48.0).with_step(4.0).with_unit("px"))
        .list(
            ListEditor::new(
                "images",
                "Images",
                SettingsForm::new()
                    .image("src", "Image")
                    .input("alt", "Alt text")
                    .url("href", "Link"),
            )
            .titled("alt")
            .reorderable(),
        )
}

fn images_link_layout(props: &PropValue) -> StyleMap {
    grid_layout(props)
}

pub static IMAGES_LINK: BlockSchema = BlockSchema {
    block_type: BlockType::ImagesLink,
    defaults: images_link_defaults,
    lists: &[ListSpec {
        path: &["images"],
        ordinal: None,
        new_item: new_linked_image,
    }],
    settings: images_link_settings,
    layout: images_link_layout,
};

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// Image gallery shown as a grid or a carousel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryProps {
    pub images: Option<Vec<GalleryImage>>,
    pub layout: Option<GalleryLayout>,
    pub columns: Option<u32>,
    pub gap: Option<f64>,
    pub show_captions: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GalleryLayout {
    Grid,
    Carousel,
}

impl GalleryImage {
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            src: Some(String::new()),
            alt: Some("Gallery image".into()),
            caption: Some(String::new()),
        }
    }
}

impl GalleryProps {
    pub fn defaults() -> Self {
        Self {
            images: Some(vec![GalleryImage::new(), GalleryImage::new(), GalleryImage::new()]),
            layout: Some(GalleryLayout::Grid),
            columns: Some(3),
            gap: Some(8.0),
            show_captions: Some(false),
        }
    }
}

fn gallery_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&GalleryProps::defaults())
}

fn new_gallery_image() -> Result<PropValue, serde_json::Error> {
    encode(&GalleryImage::new())
}

fn gallery_settings() -> SettingsForm {
    SettingsForm::new()
        .select("layout", "Layout", &["grid", "carousel"])
        .number("columns", "Columns", FieldConstraints::range(1.0, 6.0).with_step(1.0))
        .slider("gap", "Spacing", FieldConstraints::range(0.0, 48.0).with_step(4.0).with_unit("px"))
        .checkbox("showCaptions", "Show captions")
        .list(
            ListEditor::new(
                "images",
                "Images",
                SettingsForm::new()
                    .image("src", "Image")
                    .input("alt", "Alt text")
                    .input("caption", "Caption"),
            )
            .titled("caption")
            .reorderable(),
        )
}

fn gallery_layout(props: &PropValue) -> StyleMap {
    if str_prop(props, "layout") == Some("carousel") {
        let mut styles = style([("display", "flex"), ("overflowX", "auto"), ("scrollSnapType", "x mandatory")]);
        if let Some(gap) = num_prop(props, "gap") {
            styles.insert("gap".into(), px(gap));
        }
        return styles;
    }
    grid_layout(props)
}

pub static GALLERY: BlockSchema = BlockSchema {
    block_type: BlockType::Gallery,
    defaults: gallery_defaults,
    lists: &[ListSpec {
        path: &["images"],
        ordinal: None,
        new_item: new_gallery_image,
    }],
    settings: gallery_settings,
    layout: gallery_layout,
};

/// CSS grid with `columns` equal tracks and `gap` spacing
pub(crate) fn grid_layout(props: &PropValue) -> StyleMap {
    let columns = props
        .get("columns")
        .and_then(PropValue::as_integer)
        .filter(|c| *c > 0)
        .unwrap_or(1);
    let mut styles = style([
        ("display", "grid".to_string()),
        ("gridTemplateColumns", format!("repeat({columns}, 1fr)")),
    ]);
    if let Some(gap) = num_prop(props, "gap") {
        styles.insert("gap".into(), px(gap));
    }
    styles
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

/// Embedded video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProps {
    pub url: Option<String>,
    pub poster: Option<String>,
    pub autoplay: Option<bool>,
    pub muted: Option<bool>,
    #[serde(rename = "loop")]
    pub loop_playback: Option<bool>,
    pub controls: Option<bool>,
    /// `width:height`, e.g. `16:9`
    pub aspect_ratio: Option<String>,
}

impl VideoProps {
    pub fn defaults() -> Self {
        Self {
            url: Some(String::new()),
            poster: Some(String::new()),
            autoplay: Some(false),
            muted: Some(true),
            loop_playback: Some(false),
            controls: Some(true),
            aspect_ratio: Some("16:9".into()),
        }
    }
}

fn video_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&VideoProps::defaults())
}

fn video_settings() -> SettingsForm {
    SettingsForm::new()
        .url("url", "Video URL")
        .image("poster", "Poster image")
        .checkbox("autoplay", "Autoplay")
        .checkbox("muted", "Muted")
        .checkbox("loop", "Loop")
        .checkbox("controls", "Show controls")
        .select("aspectRatio", "Aspect ratio", &["16:9", "4:3", "1:1", "9:16"])
}

fn video_layout(props: &PropValue) -> StyleMap {
    let ratio = str_prop(props, "aspectRatio")
        .and_then(|ratio| ratio.split_once(':'))
        .map(|(w, h)| format!("{} / {}", w.trim(), h.trim()));
    match ratio {
        Some(ratio) => style([("aspectRatio", ratio)]),
        None => StyleMap::new(),
    }
}

pub static VIDEO: BlockSchema = BlockSchema {
    block_type: BlockType::Video,
    defaults: video_defaults,
    lists: &[],
    settings: video_settings,
    layout: video_layout,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_text_position_drives_direction() {
        let mut props = ImageTextProps::defaults();
        if let Some(image) = props.image.as_mut() {
            image.position = Some(ImagePosition::Right);
        }
        let styles = image_text_layout(&encode(&props).unwrap());
        assert_eq!(styles.get("flexDirection"), Some(&PropValue::from("row-reverse")));
        assert_eq!(styles.get("gap"), Some(&PropValue::from("16px")));
    }

    #[test]
    fn test_gallery_grid_and_carousel() {
        let mut props = GalleryProps::defaults();
        let grid = gallery_layout(&encode(&props).unwrap());
        assert_eq!(grid.get("gridTemplateColumns"), Some(&PropValue::from("repeat(3, 1fr)")));

        props.layout = Some(GalleryLayout::Carousel);
        let carousel = gallery_layout(&encode(&props).unwrap());
        assert_eq!(carousel.get("display"), Some(&PropValue::from("flex")));
        assert!(carousel.get("gridTemplateColumns").is_none());
    }

    #[test]
    fn test_video_loop_field_name() {
        let value = encode(&VideoProps::defaults()).unwrap();
        assert_eq!(value.get("loop"), Some(&PropValue::Boolean(false)));
        assert_eq!(video_layout(&value).get("aspectRatio"), Some(&PropValue::from("16 / 9")));
    }

    #[test]
    fn test_default_gallery_ids_unique() {
        let images = GalleryProps::defaults().images.unwrap();
        assert_ne!(images[0].id, images[1].id);
        assert_ne!(images[1].id, images[2].id);
    }
}
