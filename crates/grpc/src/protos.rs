/// TempConv service definitions from tempconv.proto
pub mod tempconv {
    tonic::include_proto!("tempconv");

    /// File descriptor set for gRPC reflection support.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("tempconv_descriptor");
}
