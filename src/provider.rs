// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ProviderError;
use crate::models::{Budget, Expense};

/// Read side of a user's budget records. Stores keep at most one per user.
pub trait BudgetProvider {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError>;
}

/// Read side of a user's full expense history, all statuses included.
pub trait ExpenseProvider {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError>;
}

impl<T: BudgetProvider + ?Sized> BudgetProvider for &T {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError> {
        (**self).get_all(user_id)
    }
}

impl<T: ExpenseProvider + ?Sized> ExpenseProvider for &T {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError> {
        (**self).get_all(user_id)
    }
}

impl<T: BudgetProvider + ?Sized> BudgetProvider for Box<T> {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError> {
        (**self).get_all(user_id)
    }
}

impl<T: ExpenseProvider + ?Sized> ExpenseProvider for Box<T> {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError> {
        (**self).get_all(user_id)
    }
}
