//! 响应归一化
//!
//! 后端返回的题目列表可能是：
//! 1. 根节点就是数组
//! 2. `{"questions": [...]}`
//! 3. `{"data": [...]}`
//!
//! 依次尝试，三者都不是则标记为无法识别

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ResponseError;
use crate::models::QuizQuestion;

/// 匹配到的响应结构
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// 根节点是数组
    Bare,
    /// `.questions`
    Questions,
    /// `.data`
    Data,
    /// 三种结构都不匹配
    Unrecognized,
}

/// 归一化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub shape: ResponseShape,
    pub questions: Vec<QuizQuestion>,
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 严格模式：无法识别的结构视为错误，而不是空列表
    pub fn require_recognized(self) -> Result<Vec<QuizQuestion>, ResponseError> {
        match self.shape {
            ResponseShape::Unrecognized => Err(ResponseError::UnrecognizedShape),
            _ => Ok(self.questions),
        }
    }
}

/// 找到承载题目列表的数组
fn locate(value: &Value) -> (ResponseShape, Option<&Vec<Value>>) {
    if let Some(items) = value.as_array() {
        return (ResponseShape::Bare, Some(items));
    }
    if let Some(items) = value.get("questions").and_then(Value::as_array) {
        return (ResponseShape::Questions, Some(items));
    }
    if let Some(items) = value.get("data").and_then(Value::as_array) {
        return (ResponseShape::Data, Some(items));
    }
    (ResponseShape::Unrecognized, None)
}

/// 把任意 JSON 归一化为题目列表
///
/// 结构可识别但某道题字段不合法时返回 `InvalidQuestion`
pub fn normalize(value: &Value) -> Result<Normalized, ResponseError> {
    let (shape, items) = locate(value);

    let Some(items) = items else {
        warn!("⚠️ 无法识别的响应结构，按空列表处理");
        return Ok(Normalized {
            shape,
            questions: Vec::new(),
        });
    };

    let questions = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            QuizQuestion::deserialize(item).map_err(|e| ResponseError::InvalidQuestion {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("响应结构 {:?}，共 {} 道题", shape, questions.len());

    Ok(Normalized { shape, questions })
}
