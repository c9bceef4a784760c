//! Bitmap saving and loading.
//!
//! Bitmaps are saved as JPEG at quality 100, dropping any alpha channel, and
//! loaded from any supported format by sniffing the file contents.

#![warn(missing_docs)]

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

use image::{DynamicImage, ImageReader, codecs::jpeg::JpegEncoder};
use memkit_store::{
    Check, Location, Method, Outcome, Parameter, Storage, Validator,
    messages::{
        ASSET_NOT_FOUND, BITMAP_LOADED, BITMAP_SAVED, CANNOT_CONVERT_TO_BITMAP,
        DESTINATION_FOLDER_NOT_FOUND, FILE_NOT_FOUND, LOAD_BITMAP, LOAD_BITMAP_FROM_ASSETS,
        LOAD_BITMAP_FROM_URI, SAVE_BITMAP, UNEXPECTED_IO_ERROR, URI_NOT_OPENED, fill,
    },
};
use url::Url;

/// In-memory bitmap.
pub type Bitmap = DynamicImage;

/// JPEG quality used when saving.
pub const JPEG_QUALITY: u8 = 100;

/// Bitmap operations on [`Storage`].
pub trait BitmapStorage {
    /// Encodes `bitmap` as JPEG into `destination`.
    fn save_bitmap<'a>(
        &self,
        bitmap: &Bitmap,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf>;

    /// Decodes the image file at `origin`.
    fn load_bitmap<'a>(&self, origin: impl Into<Location<'a>>) -> Outcome<Bitmap>;

    /// Decodes a bundled asset.
    fn load_bitmap_from_assets(&self, file_name: &str) -> Outcome<Bitmap>;

    /// Decodes the resource `uri` refers to.
    fn load_bitmap_from_uri(&self, uri: &str) -> Outcome<Bitmap>;
}

impl BitmapStorage for Storage {
    fn save_bitmap<'a>(
        &self,
        bitmap: &Bitmap,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(SAVE_BITMAP, &[&destination.to_string()]);
            let validator = Validator::new(Method::SaveBitmap).check(Check::Present {
                parameter: Parameter::Bitmap,
                value: Some(format!("{}x{} bitmap", bitmap.width(), bitmap.height())),
            });
            let target = self.prepare_destination(validator, &destination, false, &action)?;

            let file = File::create(&target).map_err(|err| {
                self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
            })?;
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                .encode_image(&bitmap.to_rgb8())
                .map_err(|err| self.fail_with(fill(UNEXPECTED_IO_ERROR, &[&action]), &err))?;
            writer
                .flush()
                .map_err(|err| self.fail_with(fill(UNEXPECTED_IO_ERROR, &[&action]), &err))?;

            Ok(self.succeed(Some(PathBuf::from(&target)), fill(BITMAP_SAVED, &[&target])))
        })
    }

    fn load_bitmap<'a>(&self, origin: impl Into<Location<'a>>) -> Outcome<Bitmap> {
        let origin = origin.into();
        Outcome::settle(|| {
            let action = fill(LOAD_BITMAP, &[&origin.to_string()]);
            let source = self.prepare_origin(Validator::new(Method::LoadBitmap), &origin)?;

            let reader = ImageReader::open(&source)
                .and_then(ImageReader::with_guessed_format)
                .map_err(|err| self.fail_with(fill(FILE_NOT_FOUND, &[&action]), &err))?;
            let bitmap = reader.decode().map_err(|err| {
                self.fail_with(fill(CANNOT_CONVERT_TO_BITMAP, &[&action]), &err)
            })?;
            Ok(self.succeed(Some(bitmap), fill(BITMAP_LOADED, &[&source])))
        })
    }

    fn load_bitmap_from_assets(&self, file_name: &str) -> Outcome<Bitmap> {
        Outcome::settle(|| {
            let action = fill(LOAD_BITMAP_FROM_ASSETS, &[file_name]);
            self.validate(
                &Validator::new(Method::LoadBitmapFromAssets)
                    .check(Check::context(self.context()))
                    .check(Check::Asset {
                        context: self.context(),
                        file_name: file_name.to_owned(),
                    }),
            )?;
            let context = self.require_context(&action)?;

            let bytes = context
                .open_asset(file_name)
                .and_then(read_all)
                .map_err(|err| self.fail_with(fill(ASSET_NOT_FOUND, &[&action]), &err))?;
            let bitmap = image::load_from_memory(&bytes).map_err(|err| {
                self.fail_with(fill(CANNOT_CONVERT_TO_BITMAP, &[&action]), &err)
            })?;
            Ok(self.succeed(Some(bitmap), fill(BITMAP_LOADED, &[file_name])))
        })
    }

    fn load_bitmap_from_uri(&self, uri: &str) -> Outcome<Bitmap> {
        Outcome::settle(|| {
            let action = fill(LOAD_BITMAP_FROM_URI, &[uri]);
            self.validate(
                &Validator::new(Method::LoadBitmapFromUri)
                    .check(Check::context(self.context()))
                    .check(Check::Uri {
                        context: self.context(),
                        uri: uri.to_owned(),
                    }),
            )?;
            let context = self.require_context(&action)?;

            let parsed = Url::parse(uri)
                .map_err(|err| self.fail_with(fill(URI_NOT_OPENED, &[&action]), &err))?;
            let reader = context
                .open_uri(&parsed)
                .map_err(|err| self.fail_with(fill(FILE_NOT_FOUND, &[&action]), &err))?
                .ok_or_else(|| self.fail(fill(URI_NOT_OPENED, &[&action])))?;
            let bytes = read_all(reader)
                .map_err(|err| self.fail_with(fill(UNEXPECTED_IO_ERROR, &[&action]), &err))?;
            let bitmap = image::load_from_memory(&bytes).map_err(|err| {
                self.fail_with(fill(CANNOT_CONVERT_TO_BITMAP, &[&action]), &err)
            })?;
            Ok(self.succeed(Some(bitmap), fill(BITMAP_LOADED, &[uri])))
        })
    }
}

fn read_all(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}
