//! Partial UPDATE statement builder

use reservation_core::Contact;

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// `SET` fragments and their bind values for the fields present in a
/// [`Contact`], numbered `?1..` in the order email, full_name, phone.
/// The row id always takes the last placeholder.
#[derive(Debug, Default, Clone)]
pub struct PartialUpdate {
    sets: Vec<String>,
    values: Vec<BindValue>,
}

impl PartialUpdate {
    pub fn from_contact(contact: &Contact) -> Self {
        let mut update = Self::default();

        if let Some(ref email) = contact.email {
            update.push("email", BindValue::Text(email.clone()));
        }
        if let Some(ref full_name) = contact.full_name {
            update.push("full_name", BindValue::Text(full_name.clone()));
        }
        if let Some(phone) = contact.phone {
            update.push("phone", BindValue::Integer(phone));
        }

        update
    }

    fn push(&mut self, column: &str, value: BindValue) {
        self.values.push(value);
        self.sets.push(format!("{} = ?{}", column, self.values.len()));
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    pub fn to_sql(&self, table: &str) -> String {
        let mut sets = self.sets.clone();
        sets.push("updated_at = CURRENT_TIMESTAMP".to_string());

        format!(
            "UPDATE {} SET {} WHERE id = ?{} RETURNING id",
            table,
            sets.join(", "),
            self.values.len() + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_in_fixed_order() {
        let update = PartialUpdate::from_contact(&Contact::new("Jane Doe", "jane@x.com", 5551234));

        assert_eq!(
            update.to_sql("candidates"),
            "UPDATE candidates SET email = ?1, full_name = ?2, phone = ?3, \
             updated_at = CURRENT_TIMESTAMP WHERE id = ?4 RETURNING id"
        );
        assert_eq!(
            update.values(),
            &[
                BindValue::Text("jane@x.com".to_string()),
                BindValue::Text("Jane Doe".to_string()),
                BindValue::Integer(5551234),
            ]
        );
    }

    #[test]
    fn test_only_present_fields() {
        let update = PartialUpdate::from_contact(&Contact {
            full_name: None,
            email: None,
            phone: Some(42),
        });

        assert_eq!(
            update.to_sql("recruiters"),
            "UPDATE recruiters SET phone = ?1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?2 RETURNING id"
        );
        assert_eq!(update.values(), &[BindValue::Integer(42)]);
    }

    #[test]
    fn test_empty() {
        assert!(PartialUpdate::from_contact(&Contact::default()).is_empty());
    }
}
