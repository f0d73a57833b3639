pub const fn padding(size: usize, align: usize) -> usize {
    if size % align == 0 {
        0
    } else {
        align - size % align
    }
}
