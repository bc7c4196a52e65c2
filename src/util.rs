pub(crate) fn read_u32_le_array<const N: usize>(
    reader: &mut impl std::io::Read,
) -> std::io::Result<[u32; N]> {
    let mut buffer = [0; N];
    reader.read_exact(bytemuck::cast_slice_mut(buffer.as_mut_slice()))?;
    for i in buffer.iter_mut() {
        *i = u32::from_le(*i);
    }
    Ok(buffer)
}
