//! 多语言模块
//!
//! `translate` 的查找顺序：当前语言 -> 英文 -> 键本身，永不失败。
//! 词条表只初始化一次，之后只读。

mod catalog;

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::OnceLock;

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Hi,
    Pa,
    Mr,
    Te,
    Ta,
    Bn,
    Gu,
}

impl Language {
    /// 语言选择器中的顺序
    pub const ALL: [Language; 8] = [
        Language::En,
        Language::Hi,
        Language::Pa,
        Language::Mr,
        Language::Te,
        Language::Ta,
        Language::Bn,
        Language::Gu,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Pa => "pa",
            Self::Mr => "mr",
            Self::Te => "te",
            Self::Ta => "ta",
            Self::Bn => "bn",
            Self::Gu => "gu",
        }
    }

    /// 解析语言代码 (忽略大小写，接受 `hi-IN` 这类地区后缀)
    pub fn from_code(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        Self::ALL.into_iter().find(|l| l.code() == lang)
    }

    /// 以该语言自身书写的名称
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिन्दी",
            Self::Pa => "ਪੰਜਾਬੀ",
            Self::Mr => "मराठी",
            Self::Te => "తెలుగు",
            Self::Ta => "தமிழ்",
            Self::Bn => "বাংলা",
            Self::Gu => "ગુજરાતી",
        }
    }

    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => catalog::EN,
            Self::Hi => catalog::HI,
            Self::Pa => catalog::PA,
            Self::Mr => catalog::MR,
            Self::Te => catalog::TE,
            Self::Ta => catalog::TA,
            Self::Bn => catalog::BN,
            Self::Gu => catalog::GU,
        }
    }
}

type Dictionary = HashMap<&'static str, &'static str>;

fn catalog() -> &'static HashMap<Language, Dictionary> {
    static CATALOG: OnceLock<HashMap<Language, Dictionary>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        Language::ALL
            .into_iter()
            .map(|lang| (lang, lang.entries().iter().copied().collect()))
            .collect()
    })
}

fn lookup(lang: Language, key: &str) -> Option<&'static str> {
    catalog().get(&lang)?.get(key).copied()
}

/// 在指定语言下翻译
pub fn translate_in<'a>(lang: Language, key: &'a str) -> &'a str {
    lookup(lang, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

/// 持有当前语言
#[derive(Debug, Default)]
pub struct Localizer {
    current: Cell<Language>,
}

impl Localizer {
    pub fn new(lang: Language) -> Self {
        Self {
            current: Cell::new(lang),
        }
    }

    pub fn language(&self) -> Language {
        self.current.get()
    }

    pub fn set_language(&self, lang: Language) {
        self.current.set(lang);
    }

    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        translate_in(self.current.get(), key)
    }
}
