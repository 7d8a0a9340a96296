//! 文档级 DOM 操作
//!
//! 页面内容由 Leptos 管理；这里只处理它管不到的 `<html>`/`<body>` 属性与滚动位置。

use crate::i18n::Language;

const LANG_CLASS_PREFIX: &str = "lang-";

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 设置 `<html lang>`，并把 `<body>` 上的 `lang-*` 类替换为当前语言
///
/// 印度文字的字体按 body 类名切换
pub fn apply_language(lang: Language) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(root) = document.document_element() {
        if let Err(e) = root.set_attribute("lang", lang.code()) {
            log::warn!("failed to set html lang: {:?}", e);
        }
    }

    let Some(body) = document.body() else {
        return;
    };
    let classes = body.class_list();
    let stale: Vec<String> = (0..classes.length())
        .filter_map(|i| classes.item(i))
        .filter(|c| c.starts_with(LANG_CLASS_PREFIX))
        .collect();
    for class in stale {
        let _ = classes.remove_1(&class);
    }
    let _ = classes.add_1(&format!("{}{}", LANG_CLASS_PREFIX, lang.code()));
}

/// 当前页面的 origin，用作默认 API 地址
pub fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
