use regex::Regex;
use std::sync::LazyLock;

// 仅匹配双引号包裹、以 `/` 开头的 href / src 属性值
static ROOT_RELATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(href|src)="(/[^"]*)""#).unwrap());

/// 将 HTML 片段中的站点根相对 URL 改写为绝对 URL
///
/// 片段缺失时返回空字符串；`base` 缺失或为空时原样返回。
/// 只替换属性值本身，其余标记保持不变。
pub fn html_to_absolute_urls(fragment: Option<&str>, base: Option<&str>) -> String {
    let Some(fragment) = fragment else {
        return String::new();
    };
    let base = match base {
        Some(b) if !b.is_empty() => b,
        _ => return fragment.to_string(),
    };

    ROOT_RELATIVE_RE
        .replace_all(fragment, |caps: &regex::Captures| {
            format!(r#"{}="{}""#, &caps[1], join_url(base, &caps[2]))
        })
        .into_owned()
}

/// 拼接 base 和路径，中间只保留一个 `/`
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
