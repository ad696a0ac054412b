//! Animated GIF decode into RGBA frames for the viewport background.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use crate::error::AssetError;
use crate::types::TextureCpu;

/// Decode every frame of an animated GIF, in order.
///
/// Frame delays stored in the file are ignored; the viewport advances on its
/// own fixed cadence.
pub fn load_gif_frames(path: &Path) -> Result<Vec<TextureCpu>, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let gif_err = |source: image::ImageError| AssetError::Gif {
        path: path.to_path_buf(),
        source,
    };
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(gif_err)?;
    let frames = decoder.into_frames().collect_frames().map_err(gif_err)?;
    if frames.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    let out: Vec<TextureCpu> = frames
        .into_iter()
        .map(|frame| {
            let img = frame.into_buffer();
            let (width, height) = img.dimensions();
            TextureCpu { pixels: img.into_raw(), width, height, srgb: true }
        })
        .collect();
    log::debug!("gif frames: {} from {}", out.len(), path.display());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_gif_is_not_found() {
        let err = load_gif_frames(Path::new("definitely/missing/bg.gif")).err();
        assert!(matches!(err, Some(AssetError::NotFound(_))));
    }

    #[test]
    fn non_gif_bytes_are_a_decode_error() {
        let path = std::env::temp_dir().join(format!("lf-assets-notgif-{}.gif", std::process::id()));
        std::fs::write(&path, b"this is not a gif").expect("write temp");
        let err = load_gif_frames(&path).err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, Some(AssetError::Gif { .. })));
    }
}
