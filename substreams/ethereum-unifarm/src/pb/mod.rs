// @generated
pub mod unifarm {
    // @@protoc_insertion_point(attribute:unifarm.v1)
    pub mod v1 {
        include!("unifarm.v1.rs");
        // @@protoc_insertion_point(unifarm.v1)
    }
}
