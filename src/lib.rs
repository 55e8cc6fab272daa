//! quillpost：Markdown 博客静态站点生成器。
//!
//! 构建分三步：从 input 目录加载内容条目（[`build::load`]），汇总文章 / 标签 /
//! 分类集合（[`collections`]），再通过注册了过滤器（[`filters`]）的 MiniJinja
//! 环境渲染到输出目录，最后原样复制静态资源。

pub mod build;
pub mod check;
pub mod collections;
pub mod config;
pub mod content;
pub mod data;
pub mod filters;
pub mod init;
