/// A complete box description showing every configuration block.
///
/// `tuckbox sample` prints it; paths are relative to the file it is saved as.
pub const SAMPLE_CONFIG: &str = r##"{
  "dimensions": { "width": 2.5, "height": 3.5, "depth": 1.0 },
  "page": { "width": 11, "height": 8.5, "margin": 0.25, "thickness": 4 },
  "common": {
    "resolution": 300,
    "margin": 0.1,
    "font_source": "fonts",
    "image_source": "images",
    "font": { "name": "Arial.ttf", "size": 90, "color": "black", "stroke": "white", "width": 1 }
  },
  "background": { "color": "#f4ead5" },
  "border": { "color": "black", "width": 4 },
  "basic": { "title": "My Game", "subtitle": "Card Box", "extra": "" },
  "detail": {
    "back": {
      "grid": [2, 4],
      "features": [
        {
          "type": "text",
          "options": { "text": ["52 cards", "2 jokers"], "align": "left" },
          "place": [1, 2],
          "anchor": [1, 1]
        }
      ]
    },
    "top": {
      "background": { "color": "#8b0000" }
    },
    "ends": {
      "orientation": "landscape",
      "features": [
        {
          "type": "panel",
          "options": { "color": "white", "border": "black", "border_width": 6 },
          "width": 0.8,
          "height": 0.5
        }
      ]
    }
  }
}
"##;
