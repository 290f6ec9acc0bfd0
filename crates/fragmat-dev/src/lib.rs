//! Fixture buffers for tests.
//!
//! [`FragmentBuilder`] assembles a minimal `Model -> Meshes -> [Material]`
//! buffer front to back. Each material slot can be a real record, an empty
//! slot, or one of a few deliberate corruptions.

use bytes::{BufMut, BytesMut};

/// Default field id of `Model.meshes`
pub const MODEL_MESHES_FIELD: u16 = 6;
/// Default field id of `Meshes.materials`
pub const MESHES_MATERIALS_FIELD: u16 = 6;

/// Offset written for a dangling material reference
const DANGLING_OFFSET: u32 = 0x7FFF_0000;
/// soffset that sends a table's vtable far past the end of any fixture
const BROKEN_SOFFSET: i32 = -0x0010_0000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaterialSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub rendered_faces: u8,
    pub stroke: u8,
}

impl MaterialSpec {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            rendered_faces: 0,
            stroke: 0,
        }
    }

    /// Raw face tag; values other than 0 and 1 do not decode
    pub fn with_faces(mut self, tag: u8) -> Self {
        self.rendered_faces = tag;
        self
    }

    /// Raw stroke tag; values other than 0 do not decode
    pub fn with_stroke(mut self, tag: u8) -> Self {
        self.stroke = tag;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Present(MaterialSpec),
    /// Zero element offset
    Absent,
    /// Element offset pointing past the end of the buffer
    Dangling,
    /// Table whose vtable lies outside the buffer
    BrokenVTable,
}

#[derive(Clone, Debug)]
enum Meshes {
    Missing,
    WithoutMaterials,
    Materials(Vec<Slot>),
}

#[derive(Clone, Debug)]
pub struct FragmentBuilder {
    model_meshes_field: u16,
    meshes_materials_field: u16,
    meshes: Meshes,
}

impl Default for FragmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentBuilder {
    /// A model with an empty material collection
    pub fn new() -> Self {
        Self {
            model_meshes_field: MODEL_MESHES_FIELD,
            meshes_materials_field: MESHES_MATERIALS_FIELD,
            meshes: Meshes::Materials(Vec::new()),
        }
    }

    pub fn with_field_ids(mut self, model_meshes: u16, meshes_materials: u16) -> Self {
        self.model_meshes_field = model_meshes;
        self.meshes_materials_field = meshes_materials;
        self
    }

    pub fn without_meshes(mut self) -> Self {
        self.meshes = Meshes::Missing;
        self
    }

    pub fn without_materials(mut self) -> Self {
        self.meshes = Meshes::WithoutMaterials;
        self
    }

    pub fn slot(mut self, slot: Slot) -> Self {
        match &mut self.meshes {
            Meshes::Materials(slots) => slots.push(slot),
            other => *other = Meshes::Materials(vec![slot]),
        }
        self
    }

    pub fn slots<I: IntoIterator<Item = Slot>>(self, slots: I) -> Self {
        slots.into_iter().fold(self, Self::slot)
    }

    pub fn material(self, spec: MaterialSpec) -> Self {
        self.slot(Slot::Present(spec))
    }

    pub fn absent(self) -> Self {
        self.slot(Slot::Absent)
    }

    pub fn dangling(self) -> Self {
        self.slot(Slot::Dangling)
    }

    pub fn broken_vtable(self) -> Self {
        self.slot(Slot::BrokenVTable)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.buf.put_u32_le(0); // root offset, patched below

        let model_fields = match self.meshes {
            Meshes::Missing => Vec::new(),
            _ => vec![(self.model_meshes_field, Field::Ref)],
        };
        let (model_pos, model_refs) = w.table(&model_fields);
        w.patch_offset(0, model_pos);

        let slots = match &self.meshes {
            Meshes::Missing => return w.finish(),
            Meshes::WithoutMaterials => {
                let (meshes_pos, _) = w.table(&[]);
                w.patch_offset(model_refs[0], meshes_pos);
                return w.finish();
            }
            Meshes::Materials(slots) => slots,
        };

        let (meshes_pos, meshes_refs) = w.table(&[(self.meshes_materials_field, Field::Ref)]);
        w.patch_offset(model_refs[0], meshes_pos);

        w.align(4);
        let vector_pos = w.pos();
        w.patch_offset(meshes_refs[0], vector_pos);
        w.buf.put_u32_le(slots.len() as u32);
        let elements: Vec<usize> = slots
            .iter()
            .map(|_| {
                let at = w.pos();
                w.buf.put_u32_le(0);
                at
            })
            .collect();

        for (slot, elem) in slots.iter().zip(elements) {
            match slot {
                Slot::Present(spec) => {
                    let (pos, _) = w.table(&[
                        (0, Field::U8(spec.r)),
                        (1, Field::U8(spec.g)),
                        (2, Field::U8(spec.b)),
                        (3, Field::U8(spec.a)),
                        (4, Field::U8(spec.rendered_faces)),
                        (5, Field::U8(spec.stroke)),
                    ]);
                    w.patch_offset(elem, pos);
                }
                Slot::Absent => {}
                Slot::Dangling => w.patch_u32(elem, DANGLING_OFFSET),
                Slot::BrokenVTable => {
                    w.align(4);
                    let pos = w.pos();
                    w.buf.put_i32_le(BROKEN_SOFFSET);
                    w.buf.put_u32_le(0);
                    w.patch_offset(elem, pos);
                }
            }
        }

        w.finish()
    }
}

#[derive(Copy, Clone, Debug)]
enum Field {
    U8(u8),
    Ref,
}

#[derive(Default)]
struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn pos(&self) -> usize {
        self.buf.len()
    }

    fn align(&mut self, n: usize) {
        while self.buf.len() % n != 0 {
            self.buf.put_u8(0);
        }
    }

    fn patch_u32(&mut self, at: usize, value: u32) {
        self.buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn patch_offset(&mut self, at: usize, target: usize) {
        self.patch_u32(at, (target - at) as u32);
    }

    /// Write a vtable followed by its table.
    ///
    /// Returns the table position and the positions of its reference slots,
    /// in the order the `Ref` fields were given.
    fn table(&mut self, fields: &[(u16, Field)]) -> (usize, Vec<usize>) {
        let field_count = fields.iter().map(|(id, _)| *id as usize + 1).max().unwrap_or(0);

        // Table body: soffset, refs (4 bytes each), then u8 scalars
        let mut offsets = vec![0u16; field_count];
        let mut cursor = 4usize;
        for (id, field) in fields {
            if let Field::Ref = field {
                offsets[*id as usize] = cursor as u16;
                cursor += 4;
            }
        }
        for (id, field) in fields {
            if let Field::U8(_) = field {
                offsets[*id as usize] = cursor as u16;
                cursor += 1;
            }
        }
        let table_len = cursor.next_multiple_of(4);

        self.align(4);
        let vtable_pos = self.pos();
        self.buf.put_u16_le((4 + 2 * field_count) as u16);
        self.buf.put_u16_le(table_len as u16);
        for off in &offsets {
            self.buf.put_u16_le(*off);
        }

        self.align(4);
        let table_pos = self.pos();
        self.buf.put_i32_le((table_pos - vtable_pos) as i32);
        let mut refs = Vec::new();
        for (_, field) in fields {
            if let Field::Ref = field {
                refs.push(self.pos());
                self.buf.put_u32_le(0);
            }
        }
        for (_, field) in fields {
            if let Field::U8(v) = field {
                self.buf.put_u8(*v);
            }
        }
        self.align(4);
        (table_pos, refs)
    }

    fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
