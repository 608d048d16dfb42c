//! Add, show, export, remove and list entries use cases

use crate::application::diary_store::{DiaryStore, StoreOptions};
use crate::domain::{DayReference, Entry, MonthReference};
use crate::error::{DaybookError, Result};
use crate::infrastructure::{
    BlobStore, DiaryRepository, FileSystemBlobStore, FileSystemKvStore, FileSystemRepository,
    KvStore,
};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::Path;

/// Store backed by a diary root on disk
pub type FileSystemDiary = DiaryStore<FileSystemBlobStore, FileSystemKvStore>;

/// Open the store of a diary root using its configuration
pub fn open_diary(repository: &FileSystemRepository) -> Result<FileSystemDiary> {
    let config = repository.load_config()?;
    Ok(DiaryStore::open(
        repository.blob_store(),
        repository.kv_store(),
        StoreOptions::from(&config),
    ))
}

/// Service wrapping a diary store for command-line use
pub struct EntryService<B, K> {
    store: DiaryStore<B, K>,
}

impl EntryService<FileSystemBlobStore, FileSystemKvStore> {
    /// Open the service on a diary root
    pub fn open(repository: &FileSystemRepository) -> Result<Self> {
        Ok(EntryService::new(open_diary(repository)?))
    }
}

impl<B: BlobStore, K: KvStore> EntryService<B, K> {
    pub fn new(store: DiaryStore<B, K>) -> Self {
        EntryService { store }
    }

    pub fn store(&self) -> &DiaryStore<B, K> {
        &self.store
    }

    /// Store the image at `image_path` for `day`
    pub fn add(&mut self, day: NaiveDate, image_path: &Path, note: &str) -> Result<Entry> {
        let image = fs::read(image_path)?;
        self.store.upsert(&image, day, note)
    }

    /// Entry stored for `day`
    pub fn show(&self, day: NaiveDate) -> Result<&Entry> {
        self.store.find(day).ok_or(DaybookError::EntryNotFound(day))
    }

    /// Copy the stored JPEG of `entry` to `output`.
    /// Returns false when its image is missing from storage.
    pub fn export(&self, entry: &Entry, output: &Path) -> Result<bool> {
        match self.store.load_image(&entry.blob_name) {
            Some(bytes) => {
                fs::write(output, bytes)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the entry stored for `day`, if any
    pub fn remove(&mut self, day: NaiveDate) -> Result<Option<Entry>> {
        self.store.delete(day)
    }

    /// All entries oldest first, optionally limited to one month
    pub fn list(&self, month_ref: Option<&str>) -> Result<Vec<&Entry>> {
        match month_ref {
            Some(month_ref) => {
                let first = MonthReference::parse(month_ref)?.resolve(today());
                Ok(self.store.entries_in_month(first))
            }
            None => {
                let mut entries: Vec<&Entry> = self.store.entries().iter().collect();
                entries.sort_by_key(|e| e.day);
                Ok(entries)
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a day reference such as `today` or `2025-03-10` against the local date
pub fn resolve_day(day_ref: &str) -> Result<NaiveDate> {
    Ok(DayReference::parse(day_ref)?.resolve(today()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("photo.png");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 6, Rgb([1, 2, 3])))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, repo)
    }

    #[test]
    fn test_add_show_and_export() {
        let (temp, repo) = setup();
        let image = write_png(temp.path());
        let mut service = EntryService::open(&repo).unwrap();
        let day = resolve_day("2025-03-10").unwrap();

        let entry = service.add(day, &image, "trip").unwrap();
        assert!(temp.path().join("photos").join(&entry.blob_name).exists());

        let shown = service.show(resolve_day("10-03-2025").unwrap()).unwrap();
        assert_eq!(shown.note, "trip");

        let out = temp.path().join("out.jpg");
        assert!(service.export(shown, &out).unwrap());
        assert_eq!(image::open(&out).unwrap().width(), 6);
    }

    #[test]
    fn test_export_writes_the_given_entry() {
        let (temp, repo) = setup();
        let image = write_png(temp.path());
        let mut service = EntryService::open(&repo).unwrap();
        let first = service.add(day(2025, 3, 10), &image, "first").unwrap();
        let second = service.add(day(2025, 3, 11), &image, "second").unwrap();

        let out = temp.path().join("out.jpg");
        assert!(service.export(&first, &out).unwrap());
        assert_eq!(
            fs::read(&out).unwrap(),
            service.store().load_image(&first.blob_name).unwrap()
        );

        assert!(service.export(&second, &out).unwrap());
        assert_eq!(
            fs::read(&out).unwrap(),
            service.store().load_image(&second.blob_name).unwrap()
        );
    }

    #[test]
    fn test_entries_survive_reopen() {
        let (temp, repo) = setup();
        let image = write_png(temp.path());
        {
            let mut service = EntryService::open(&repo).unwrap();
            service.add(day(2025, 3, 10), &image, "trip").unwrap();
            service.add(day(2025, 4, 1), &image, "").unwrap();
        }

        let service = EntryService::open(&repo).unwrap();
        let days: Vec<NaiveDate> = service.list(None).unwrap().iter().map(|e| e.day).collect();
        assert_eq!(days, vec![day(2025, 3, 10), day(2025, 4, 1)]);
        assert_eq!(service.list(Some("2025-04")).unwrap().len(), 1);
    }

    #[test]
    fn test_show_missing_day() {
        let (_temp, repo) = setup();
        let service = EntryService::open(&repo).unwrap();
        assert!(matches!(
            service.show(day(2025, 3, 10)),
            Err(DaybookError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_export_with_missing_blob_reports_false() {
        let (temp, repo) = setup();
        let image = write_png(temp.path());
        let mut service = EntryService::open(&repo).unwrap();
        let entry = service.add(day(2025, 3, 10), &image, "").unwrap();
        fs::remove_file(temp.path().join("photos").join(&entry.blob_name)).unwrap();

        assert!(!service.export(&entry, &temp.path().join("out.jpg")).unwrap());
    }

    #[test]
    fn test_remove() {
        let (temp, repo) = setup();
        let image = write_png(temp.path());
        let mut service = EntryService::open(&repo).unwrap();
        service.add(day(2025, 3, 10), &image, "").unwrap();

        assert!(service.remove(day(2025, 3, 10)).unwrap().is_some());
        assert!(service.remove(day(2025, 3, 10)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_day_reference() {
        assert!(matches!(
            resolve_day("someday"),
            Err(DaybookError::InvalidDayReference(_))
        ));
    }
}
