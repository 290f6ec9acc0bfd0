//! Decoded model handle and the material access contract.

use crate::buf::FragBuf;
use crate::material::MaterialRecord;
use crate::options::LoadOptions;
use crate::schema::SchemaLayout;
use crate::table::{Table, Vector};
use fragmat_error::{FragError, Result};
use log::{debug, warn};
use std::path::Path;

/// Read access to a bounded, randomly addressable material collection.
///
/// `material_at` distinguishes an empty slot (`Ok(None)`) from a record that
/// could not be decoded (`Err`).
pub trait MaterialSource {
    fn has_materials(&self) -> bool;

    fn material_count(&self) -> usize;

    fn material_at(&self, index: usize) -> Result<Option<MaterialRecord>>;

    /// Fixed description of the record layout, when the source has one
    fn schema_description(&self) -> Option<String> {
        None
    }
}

impl<T: MaterialSource + ?Sized> MaterialSource for &T {
    fn has_materials(&self) -> bool {
        (**self).has_materials()
    }

    fn material_count(&self) -> usize {
        (**self).material_count()
    }

    fn material_at(&self, index: usize) -> Result<Option<MaterialRecord>> {
        (**self).material_at(index)
    }

    fn schema_description(&self) -> Option<String> {
        (**self).schema_description()
    }
}

#[derive(Copy, Clone, Debug)]
struct MaterialsRef {
    pos: usize,
    len: usize,
}

/// A model file whose root table decoded successfully
#[derive(Clone, Debug)]
pub struct Model {
    buf: FragBuf,
    layout: SchemaLayout,
    root_pos: usize,
    materials: Option<MaterialsRef>,
}

impl Model {
    /// Decode the root table and locate the material collection.
    ///
    /// Only a broken root is fatal. A meshes table or materials vector that
    /// fails to decode is logged and the model reports no materials.
    pub fn from_buf(buf: FragBuf, layout: SchemaLayout) -> Result<Self> {
        let root = Table::root(buf.as_slice())?;
        let root_pos = root.position();
        let materials = match locate_materials(&root, &layout) {
            Ok(found) => found.map(|v| MaterialsRef {
                pos: v.position(),
                len: v.len(),
            }),
            Err(e) => {
                warn!(
                    "material collection unreadable, treating as absent: {}",
                    e.detail()
                );
                None
            }
        };
        debug!(
            "root table at 0x{:X}, materials: {:?}",
            root_pos,
            materials.map(|m| m.len)
        );
        Ok(Self {
            buf,
            layout,
            root_pos,
            materials,
        })
    }

    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        Self::from_buf(FragBuf::from_vec(data), SchemaLayout::default())
    }

    /// Load a model file from disk.
    pub fn open<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let buf = load_buf(path, options).map_err(|e| e.with_file_path(path))?;
        debug!("loaded {:?} from {}", buf, path.display());
        Self::from_buf(buf, options.layout).map_err(|e| e.with_file_path(path))
    }

    pub fn layout(&self) -> &SchemaLayout {
        &self.layout
    }

    pub fn root_position(&self) -> usize {
        self.root_pos
    }

    /// Size of the underlying buffer in bytes
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the file is memory-mapped rather than read into memory
    pub fn is_mapped(&self) -> bool {
        self.buf.is_mapped()
    }
}

fn locate_materials<'a>(root: &Table<'a>, layout: &SchemaLayout) -> Result<Option<Vector<'a>>> {
    let Some(meshes) = root.field_table(layout.model_meshes_field)? else {
        return Ok(None);
    };
    meshes.field_vector(layout.meshes_materials_field)
}

fn load_buf(path: &Path, options: &LoadOptions) -> Result<FragBuf> {
    if options.prefer_mmap {
        #[cfg(feature = "mmap")]
        {
            let file = std::fs::File::open(path)?;
            // SAFETY: the mapping is read-only and never handed out mutably.
            let mmap = unsafe { memmap2::Mmap::map(&file)? };
            return Ok(FragBuf::from_mmap(mmap));
        }
        #[cfg(not(feature = "mmap"))]
        warn!("memory mapping requested but the mmap feature is disabled, reading instead");
    }
    Ok(FragBuf::from_vec(std::fs::read(path)?))
}

impl MaterialSource for Model {
    fn has_materials(&self) -> bool {
        self.materials.is_some()
    }

    fn material_count(&self) -> usize {
        self.materials.map_or(0, |m| m.len)
    }

    fn material_at(&self, index: usize) -> Result<Option<MaterialRecord>> {
        let Some(materials) = self.materials else {
            return Err(FragError::decode_out_of_range("model has no material collection")
                .with_index(index));
        };
        let vector = Vector::at(self.buf.as_slice(), materials.pos)?;
        let table = vector.table_at(index).map_err(|e| e.with_index(index))?;
        match table {
            Some(table) => MaterialRecord::decode(&table)
                .map(Some)
                .map_err(|e| e.with_index(index)),
            None => Ok(None),
        }
    }

    fn schema_description(&self) -> Option<String> {
        Some(self.layout.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{RenderedFaces, Stroke};
    use fragmat_dev::{FragmentBuilder, MaterialSpec};
    use fragmat_error::DecodeErrorKind;
    use std::io::Write;

    #[test]
    fn decodes_present_absent_and_corrupt_slots() {
        let data = FragmentBuilder::new()
            .material(MaterialSpec::rgba(10, 20, 30, 255).with_faces(1))
            .absent()
            .dangling()
            .broken_vtable()
            .material(MaterialSpec::rgba(1, 2, 3, 4).with_faces(7))
            .build();
        let model = Model::from_vec(data).unwrap();

        assert!(model.has_materials());
        assert_eq!(model.material_count(), 5);

        let first = model.material_at(0).unwrap().unwrap();
        assert_eq!(first.rgba(), [10, 20, 30, 255]);
        assert_eq!(first.rendered_faces, RenderedFaces::Two);
        assert_eq!(first.stroke, Stroke::Default);

        assert!(model.material_at(1).unwrap().is_none());

        let dangling = model.material_at(2).unwrap_err();
        assert_eq!(dangling.decode_kind(), Some(&DecodeErrorKind::InvalidOffset));
        assert_eq!(dangling.index(), Some(2));

        let broken = model.material_at(3).unwrap_err();
        assert_eq!(broken.decode_kind(), Some(&DecodeErrorKind::InvalidVTable));

        let bad_tag = model.material_at(4).unwrap_err();
        assert_eq!(bad_tag.decode_kind(), Some(&DecodeErrorKind::InvalidEnum));
        assert_eq!(bad_tag.index(), Some(4));

        let past_end = model.material_at(5).unwrap_err();
        assert_eq!(past_end.decode_kind(), Some(&DecodeErrorKind::OutOfRange));
    }

    #[test]
    fn missing_meshes_or_materials_means_no_collection() {
        let model = Model::from_vec(FragmentBuilder::new().without_meshes().build()).unwrap();
        assert!(!model.has_materials());
        assert_eq!(model.material_count(), 0);
        assert!(model.material_at(0).is_err());

        let model = Model::from_vec(FragmentBuilder::new().without_materials().build()).unwrap();
        assert!(!model.has_materials());
    }

    #[test]
    fn empty_collection_is_present() {
        let model = Model::from_vec(FragmentBuilder::new().build()).unwrap();
        assert!(model.has_materials());
        assert_eq!(model.material_count(), 0);
    }

    #[test]
    fn layout_selects_field_ids() {
        let data = FragmentBuilder::new()
            .with_field_ids(1, 3)
            .material(MaterialSpec::rgba(9, 9, 9, 9))
            .build();

        let default_layout = Model::from_vec(data.clone()).unwrap();
        assert!(!default_layout.has_materials());

        let layout = SchemaLayout {
            model_meshes_field: 1,
            meshes_materials_field: 3,
        };
        let model = Model::from_buf(FragBuf::from_vec(data), layout).unwrap();
        assert_eq!(model.material_count(), 1);
        assert_eq!(model.layout(), &layout);
    }

    #[test]
    fn truncated_root_is_fatal() {
        let err = Model::from_vec(vec![1, 2, 3]).unwrap_err();
        assert_eq!(err.decode_kind(), Some(&DecodeErrorKind::MissingRoot));
    }

    #[test]
    fn open_reads_and_maps_files() {
        let data = FragmentBuilder::new()
            .material(MaterialSpec::rgba(5, 6, 7, 8))
            .build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        for prefer_mmap in [false, true] {
            let options = LoadOptions::default().with_mmap(prefer_mmap);
            let model = Model::open(file.path(), &options).unwrap();
            assert_eq!(model.byte_len(), data.len());
            assert_eq!(model.is_mapped(), prefer_mmap && cfg!(feature = "mmap"));
            assert_eq!(model.material_at(0).unwrap().unwrap().rgba(), [5, 6, 7, 8]);
        }
    }

    #[test]
    fn open_missing_file_carries_path() {
        let err = Model::open("/nonexistent/house.frag", &LoadOptions::default()).unwrap_err();
        assert!(err.is_io());
        assert!(err.user_message().contains("house.frag"));
    }

    #[test]
    fn model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Model>();

        let mut builder = FragmentBuilder::new();
        for i in 0..12u8 {
            builder = if i % 3 == 0 {
                builder.dangling()
            } else {
                builder.material(MaterialSpec::rgba(i, i, i, 255))
            };
        }
        let model = std::sync::Arc::new(Model::from_vec(builder.build()).unwrap());
        let expected: Vec<_> = (0..14).map(|i| model.material_at(i).ok()).collect();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let model = std::sync::Arc::clone(&model);
                std::thread::spawn(move || {
                    (0..14).map(|i| model.material_at(i).ok()).collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
