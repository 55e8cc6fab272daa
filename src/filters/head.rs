/// 取序列的前 `n` 个元素；`n` 为负数时取最后 `|n|` 个
///
/// 超出长度时返回全部元素。
pub fn head<T: Clone>(items: &[T], n: i64) -> Vec<T> {
    let len = items.len();
    let count = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX).min(len);
    if n >= 0 {
        items[..count].to_vec()
    } else {
        items[len - count..].to_vec()
    }
}
