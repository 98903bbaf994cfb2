use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Object: Packable {
    /// Digest of the serialized form, the object's address in the store
    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.serialize())
    }
}
