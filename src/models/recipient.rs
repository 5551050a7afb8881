use serde::{Deserialize, Serialize};

/// 收件人记录：表格中的一行（姓名、电话、邮箱）
///
/// 三个字段都已去除首尾空白并保证非空。记录的身份是它在表格中的位置，
/// 不做去重。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl RecipientRecord {
    /// 从三个原始单元格构建记录，任意字段为空白时返回 `None`
    pub fn from_fields(name: &str, phone: &str, email: &str) -> Option<Self> {
        let (name, phone, email) = (name.trim(), phone.trim(), email.trim());
        if name.is_empty() || phone.is_empty() || email.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        })
    }
}
