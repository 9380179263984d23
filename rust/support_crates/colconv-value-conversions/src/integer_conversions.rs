//! Bit-pattern reinterpretation of INT32/INT64 values as narrower or unsigned
//! integers. None of these can fail: the stored two's-complement pattern is
//! truncated to the target width and read back with the target signedness.

#[inline]
pub fn int32_to_uint8(value: i32) -> u64 {
    value as u8 as u64
}

#[inline]
pub fn int32_to_uint16(value: i32) -> u64 {
    value as u16 as u64
}

#[inline]
pub fn int32_to_uint32(value: i32) -> u64 {
    value as u32 as u64
}

#[inline]
pub fn int64_to_uint64(value: i64) -> u64 {
    value as u64
}

#[inline]
pub fn int32_to_int8(value: i32) -> i64 {
    value as i8 as i64
}

#[inline]
pub fn int32_to_int16(value: i32) -> i64 {
    value as i16 as i64
}

#[inline]
pub fn int32_to_int32(value: i32) -> i64 {
    value as i64
}

#[inline]
pub fn int64_to_int64(value: i64) -> i64 {
    value
}
