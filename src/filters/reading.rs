/// 每分钟阅读词数
pub const WORDS_PER_MINUTE: usize = 200;

/// 预估阅读时间（分钟），按空白分词后向上取整，最少 1 分钟
pub fn reading_time(content: Option<&str>) -> u32 {
    let Some(text) = content else {
        return 1;
    };
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}
