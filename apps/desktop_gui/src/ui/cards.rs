//! Result card rendering and PNG preview decoding.

use std::collections::HashMap;

use client_core::{codec::decode_base64, CardAction, PageCard};
use egui::{ColorImage, TextureHandle, TextureOptions};
use shared::domain::PageNumber;

const PREVIEW_EDGE: u32 = 360;
pub const CARD_WIDTH: f32 = 220.0;
const PREVIEW_HEIGHT: f32 = 200.0;

/// Decodes a base64 PNG into a thumbnail ready for upload to the GPU.
pub fn decode_preview(base64_png: &str) -> Result<ColorImage, String> {
    let bytes = decode_base64(base64_png).map_err(|err| err.to_string())?;
    let dynamic = image::load_from_memory(&bytes).map_err(|err| err.to_string())?;
    let thumbnail = dynamic.thumbnail(PREVIEW_EDGE, PREVIEW_EDGE).to_rgba8();
    let size = [thumbnail.width() as usize, thumbnail.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, thumbnail.as_raw()))
}

/// Textures for the currently displayed result set. `None` marks a preview
/// that failed to decode so it is not retried every frame.
#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<PageNumber, Option<TextureHandle>>,
}

impl PreviewCache {
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    fn texture(&mut self, ctx: &egui::Context, card: &PageCard) -> Option<TextureHandle> {
        let base64_png = card.preview_png_base64.as_ref()?;
        self.textures
            .entry(card.page_number)
            .or_insert_with(|| match decode_preview(base64_png) {
                Ok(image) => Some(ctx.load_texture(
                    format!("page-preview-{}", card.page_number),
                    image,
                    TextureOptions::default(),
                )),
                Err(err) => {
                    tracing::warn!(page_number = card.page_number.0, "preview decode failed: {err}");
                    None
                }
            })
            .clone()
    }
}

/// Draws one card and returns the action the user clicked, if any.
pub fn show_card(ui: &mut egui::Ui, previews: &mut PreviewCache, card: &PageCard) -> Option<CardAction> {
    let mut clicked = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            match previews.texture(ui.ctx(), card) {
                Some(texture) => {
                    ui.add(
                        egui::Image::new(&texture)
                            .max_height(PREVIEW_HEIGHT)
                            .max_width(CARD_WIDTH),
                    );
                }
                None => {
                    ui.add_sized(
                        [CARD_WIDTH, PREVIEW_HEIGHT],
                        egui::Label::new(egui::RichText::new("PDF").size(32.0).weak()),
                    );
                }
            }

            ui.horizontal(|ui| {
                ui.strong(format!("Page {}", card.page_number));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&card.size_label);
                });
            });
            ui.separator();

            for action in &card.actions {
                let button = egui::Button::new(action.label()).min_size(egui::vec2(CARD_WIDTH, 0.0));
                if ui.add(button).clicked() {
                    clicked = Some(action.clone());
                }
            }
        });
    });
    clicked
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use client_core::codec::encode_base64;
    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_base64(width: u32, height: u32) -> String {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        encode_base64(&bytes)
    }

    #[test]
    fn decodes_small_preview_at_native_size() {
        let image = decode_preview(&png_base64(4, 3)).expect("preview");
        assert_eq!(image.size, [4, 3]);
    }

    #[test]
    fn shrinks_large_previews() {
        let image = decode_preview(&png_base64(1200, 600)).expect("preview");
        assert!(image.size[0] <= PREVIEW_EDGE as usize);
        assert!(image.size[1] <= PREVIEW_EDGE as usize);
    }

    #[test]
    fn rejects_non_png_payload() {
        assert!(decode_preview(&encode_base64(b"%PDF-1.4")).is_err());
        assert!(decode_preview("***").is_err());
    }
}
