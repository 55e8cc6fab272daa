use crate::config::CONFIG_FILE;
use anyhow::Result;
use std::fs;
use std::path::Path;

// 默认 quillpost.toml
const DEFAULT_CONFIG: &str = r#"[site]
title = "My Blog"
url = "https://example.com"
description = ""
language = "en"

[dirs]
input = "src"
includes = "_includes"
data = "_data"
output = "_site"

[collections]
posts_dir = "posts"
ignored_tags = ["all", "posts"]
"#;

const TPL_BASE: &str = r#"<!doctype html>
<html lang="{{ site.language }}">
<head>
  <meta charset="utf-8">
  <title>{% if title %}{{ title }} | {% endif %}{{ site.title }}</title>
  <link rel="stylesheet" href="/assets/style.css">
</head>
<body>
  <header><a href="/">{{ site.title }}</a></header>
  <main>{% block main %}{{ content }}{% endblock %}</main>
</body>
</html>
"#;

const TPL_POST: &str = r#"{% extends "base.html" %}
{% block main %}
<article>
  <h1>{{ title }}</h1>
  <p>
    <time datetime="{{ date | htmlDateString }}">{{ date | readableDate }}</time>
    · {{ content | readingTime }} min read
  </p>
  <ul class="tags">
  {% for tag in tags %}{% if tag != "posts" %}
    <li style="background: {{ tag | tagColor }}">{{ tag }}</li>
  {% endif %}{% endfor %}
  </ul>
  {{ content }}
</article>
{% endblock %}
"#;

const PAGE_INDEX: &str = r#"---
title: Home
layout: base.html
---
<h2>Latest posts</h2>
<ul>
{% for post in collections.posts | head(10) %}
  <li><a href="{{ post.url }}">{{ post.title }}</a> <small>{{ post.date | readableDate }}</small></li>
{% endfor %}
</ul>
<h2>Tags</h2>
<p>{% for tag in collections.tagList %}<a href="/tags/{{ tag | slugify }}/">{{ tag }}</a> {% endfor %}</p>
<h2>Categories</h2>
<p>{% for category in collections.categoryList %}{{ category }} {% endfor %}</p>
"#;

const PAGE_FEED: &str = r#"---
permalink: /feed.xml
---
<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>{{ site.title | escape }}</title>
  <link href="{{ site.url }}/"/>
{% for post in collections.posts | head(20) %}
  <entry>
    <title>{{ post.title | escape }}</title>
    <link href="{{ site.url }}{{ post.url }}"/>
    <updated>{{ post.date }}</updated>
    <content type="html">{{ post.body | htmlToAbsoluteUrls(site.url) | escape }}</content>
  </entry>
{% endfor %}
</feed>
"#;

const POST_HELLO: &str = r#"---
title: Hello World
date: 2024-01-01
tags: [posts, Rust]
category: Notes
layout: post.html
---
Welcome to the new blog. ![logo](/assets/logo.svg)
"#;

const TAG_COLORS: &str = r##"{
  "rust": "#dea584",
  "javascript": "#f7df1e"
}
"##;

const STYLE_CSS: &str = "body { max-width: 40rem; margin: 0 auto; font-family: sans-serif; }\n";

/// 检测项目是否已初始化，未初始化则自动创建骨架。
/// 返回 `true` 表示执行了初始化，`false` 表示已存在。
pub fn ensure_initialized(root: &Path) -> Result<bool> {
    if root.join(CONFIG_FILE).exists() {
        return Ok(false);
    }

    let dirs = [
        "src/_includes",
        "src/_data",
        "src/posts",
        "src/assets",
    ];
    for dir in &dirs {
        fs::create_dir_all(root.join(dir))?;
    }

    fs::write(root.join(CONFIG_FILE), DEFAULT_CONFIG)?;

    let files: &[(&str, &str)] = &[
        ("src/_includes/base.html", TPL_BASE),
        ("src/_includes/post.html", TPL_POST),
        ("src/_data/tagColors.json", TAG_COLORS),
        ("src/index.html", PAGE_INDEX),
        ("src/feed.html", PAGE_FEED),
        ("src/posts/hello-world.md", POST_HELLO),
        ("src/assets/style.css", STYLE_CSS),
    ];

    for (path, content) in files {
        fs::write(root.join(path), content)?;
    }

    Ok(true)
}
