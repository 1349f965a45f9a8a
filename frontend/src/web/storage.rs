//! LocalStorage 封装模块
//!
//! `web_sys::Storage` as a [`KeyValueStorage`] backend for the session store.

use storerate::session::KeyValueStorage;

/// 本地存储操作封装
///
/// Every call looks the storage object up again, so a browser that blocks
/// `localStorage` simply reads as empty and refuses writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 当前窗口的 `localStorage`，不可用时为 `None`
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for BrowserStorage {
    /// 读取会话记录的一项
    ///
    /// # 返回
    /// - `Some(String)` 键存在
    /// - `None` 键缺失，或浏览器拒绝访问存储
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 写入一项
    ///
    /// # 参数
    /// - `key`: 会话键（token 或用户记录）
    /// - `value`: 序列化后的值
    ///
    /// # 返回
    /// - `false` 存储不可用或配额已满
    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除一项；键本就不存在也算成功
    ///
    /// # 返回
    /// - `false` 仅当存储不可用
    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
