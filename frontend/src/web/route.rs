//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有页面及其访问守卫。

use std::fmt::Display;

/// 应用页面枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    /// 首页 (默认页面)
    #[default]
    Home,
    Login,
    Register,
    /// 作物推荐表单
    Recommend,
    Dashboard,
    Chatbot,
    Profile,
    Admin,
}

/// 页面访问守卫
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// 任何人可访问
    Public,
    /// 未登录时渲染登录提示，不运行初始化
    LoginPrompt,
    /// 未登录时改为导航到登录页
    RedirectToLogin,
}

impl PageId {
    /// 出现在导航栏中的页面 (顺序即显示顺序)
    pub const NAV: [PageId; 4] = [
        PageId::Home,
        PageId::Recommend,
        PageId::Dashboard,
        PageId::Chatbot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Recommend => "recommend",
            Self::Dashboard => "dashboard",
            Self::Chatbot => "chatbot",
            Self::Profile => "profile",
            Self::Admin => "admin",
        }
    }

    /// 导航栏标签的翻译键
    pub fn nav_label_key(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "signup",
            Self::Recommend => "advisory",
            Self::Dashboard => "dashboard",
            Self::Chatbot => "chatbot",
            Self::Profile => "profile",
            Self::Admin => "admin",
        }
    }

    /// **核心守卫逻辑：定义该页面的访问规则**
    pub fn guard(&self) -> Guard {
        match self {
            Self::Recommend | Self::Dashboard | Self::Chatbot => Guard::LoginPrompt,
            Self::Profile => Guard::RedirectToLogin,
            // 管理端使用独立的密钥，不依赖用户会话
            Self::Home | Self::Login | Self::Register | Self::Admin => Guard::Public,
        }
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 登录/注册成功后的目标
    pub fn auth_success_redirect() -> Self {
        Self::Recommend
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_table() {
        assert_eq!(PageId::Home.guard(), Guard::Public);
        assert_eq!(PageId::Admin.guard(), Guard::Public);
        assert_eq!(PageId::Recommend.guard(), Guard::LoginPrompt);
        assert_eq!(PageId::Chatbot.guard(), Guard::LoginPrompt);
        assert_eq!(PageId::Profile.guard(), Guard::RedirectToLogin);
    }
}
