pub mod color;
pub mod date;
pub mod head;
pub mod reading;
pub mod url;

use color::TagColorTable;
use minijinja::value::ValueKind;
use minijinja::{Environment, Value};
use std::sync::Arc;

/// 向 MiniJinja 环境注册所有内置过滤器
///
/// 颜色表以 `Arc` 共享给 `tagColor` 闭包，注册后只读。
pub fn register_filters(env: &mut Environment<'_>, tag_colors: Arc<TagColorTable>) {
    env.add_filter("readableDate", filter_readable_date);
    env.add_filter("htmlDateString", filter_html_date_string);
    env.add_filter("readingTime", filter_reading_time);
    env.add_filter("head", filter_head);
    env.add_filter("htmlToAbsoluteUrls", filter_html_to_absolute_urls);
    env.add_filter("slugify", filter_slugify);
    env.add_filter("tagColor", move |tag: Value| -> String {
        tag_colors.resolve(tag.as_str()).to_string()
    });
}

fn filter_readable_date(value: Value) -> String {
    date::readable_date(date::coerce_date(&value).as_ref())
}

fn filter_html_date_string(value: Value) -> String {
    date::html_date_string(date::coerce_date(&value).as_ref())
}

fn filter_reading_time(value: Value) -> u32 {
    reading::reading_time(value.as_str())
}

fn filter_head(value: Value, n: i64) -> Value {
    if value.kind() != ValueKind::Seq {
        return value;
    }
    let items: Vec<Value> = match value.try_iter() {
        Ok(iter) => iter.collect(),
        Err(_) => return value,
    };
    Value::from(head::head(&items, n))
}

fn filter_html_to_absolute_urls(value: Value, base: Option<Value>) -> Value {
    if value.is_undefined() || value.is_none() {
        return Value::from("");
    }
    let Some(fragment) = value.as_str() else {
        return value;
    };
    let base = base.as_ref().and_then(|b| b.as_str());
    let rewritten = url::html_to_absolute_urls(Some(fragment), base);

    // 输入是安全 HTML 时保持安全标记，避免被二次转义
    if value.is_safe() {
        Value::from_safe_string(rewritten)
    } else {
        Value::from(rewritten)
    }
}

fn filter_slugify(value: String) -> String {
    slugify(&value)
}

/// 生成 slug：非 ASCII 字符先音译，小写，非字母数字连续段折叠为单个 `-`
pub fn slugify(value: &str) -> String {
    slug::slugify(value)
}
