use glam::Vec3;

/// Fixed-width native-endian byte conversion for the values stored in a
/// capture.
pub trait AsBytes<const N: usize>: Sized {
    fn from_bytes(bytes: [u8; N]) -> Self;

    fn to_bytes(self) -> [u8; N];
}

impl AsBytes<4> for f32 {
    fn from_bytes(bytes: [u8; 4]) -> Self {
        f32::from_ne_bytes(bytes)
    }

    fn to_bytes(self) -> [u8; 4] {
        self.to_ne_bytes()
    }
}

impl AsBytes<4> for u32 {
    fn from_bytes(bytes: [u8; 4]) -> Self {
        u32::from_ne_bytes(bytes)
    }

    fn to_bytes(self) -> [u8; 4] {
        self.to_ne_bytes()
    }
}

impl AsBytes<8> for u64 {
    fn from_bytes(bytes: [u8; 8]) -> Self {
        u64::from_ne_bytes(bytes)
    }

    fn to_bytes(self) -> [u8; 8] {
        self.to_ne_bytes()
    }
}

impl AsBytes<12> for Vec3 {
    fn from_bytes(bytes: [u8; 12]) -> Self {
        Vec3::new(
            f32::from_bytes(bytes[0..4].try_into().unwrap()),
            f32::from_bytes(bytes[4..8].try_into().unwrap()),
            f32::from_bytes(bytes[8..12].try_into().unwrap()),
        )
    }

    fn to_bytes(self) -> [u8; 12] {
        [self.x.to_bytes(), self.y.to_bytes(), self.z.to_bytes()]
            .concat()
            .try_into()
            .unwrap()
    }
}
