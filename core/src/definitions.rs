//! Shared property table and object type definitions for the EveryAction 8
//! VAN API.
//!
//! Property names are the documented camelCase names. Aliases are the short
//! forms callers may use instead; the snake_case form of every name is
//! accepted without being listed here.

use crate::schema::{ObjectKind as K, PropertyDef as P, TypeDef as T};

/// Properties used by more than one type or endpoint.
pub const SHARED: &[P] = &[
    // Scalars.
    P::scalar("action", &[]),
    P::scalar("apiKeyTypeName", &["type_name", "type"]),
    P::scalar("assignedValue", &["value"]),
    P::scalar("canHaveMultipleLocations", &["allows_multiple_locations"]),
    P::scalar("canHaveMultipleShifts", &["allows_multiple_shifts"]),
    P::scalar("canvassedBy", &["canvasser"]),
    P::scalar("city", &[]),
    P::scalar("code", &[]),
    P::scalar("codeIds", &["codes"]),
    P::scalar("codeType", &["type"]),
    P::scalar("color", &[]),
    P::scalar("commonName", &["common"]),
    P::scalar("committeeId", &[]),
    P::scalar("committeeName", &["committee"]),
    P::scalar("contactMode", &[]),
    P::scalar("contactTypeId", &["contact_type"]),
    P::scalar("countryCode", &["country"]),
    P::scalar("createdByCommitteeId", &["committee"]),
    P::scalar("createdDate", &["created"]),
    P::scalar("customFieldGroupId", &["group"]),
    P::scalar("customFieldId", &["field"]),
    P::scalar("databaseName", &["database"]),
    P::scalar("dateCanvassed", &["canvassed"]),
    P::scalar("dateCreated", &["created"]),
    P::scalar("dateModified", &["modified"]),
    P::scalar("dateOfBirth", &["birthday"]),
    P::scalar("description", &["desc"]),
    P::scalar("designationId", &["designation"]),
    P::scalar("detailedCode", &[]),
    P::scalar("dialingPrefix", &["prefix"]),
    P::scalar("displayName", &["display"]),
    P::scalar("dotNetTimeZoneId", &["dot_net_time_zone", "time_zone"]),
    P::scalar("email", &[]),
    P::scalar("employer", &[]),
    P::scalar("endDate", &["end"]),
    P::scalar("endTime", &["end"]),
    P::scalar("endTimeOverride", &["end_override", "end"]),
    P::scalar("envelopeName", &["envelope"]),
    P::scalar("eventId", &["event"]),
    P::scalar("eventTypeId", &["event_type", "type"]),
    P::scalar("eventTypeIds", &["event_types"]),
    P::scalar("ext", &[]),
    P::scalar("externalId", &["external"]),
    P::scalar("firstName", &["first"]),
    P::scalar("goal", &[]),
    P::scalar("hasMyCampaign", &["my_campaign"]),
    P::scalar("hasMyVoters", &["my_voters"]),
    P::scalar("hint", &[]),
    P::scalar("id", &[]),
    P::scalar("inRepetitionWithEventId", &["repeat_of"]),
    P::scalar("inputTypeId", &["input_type"]),
    P::scalar("isActive", &["active"]),
    P::scalar("isEventLead", &["event_lead", "lead"]),
    P::scalar("isMultiAssign", &["multi_assign"]),
    P::scalar("isMyOrganization", &["my_organization", "my_org"]),
    P::scalar("isOfflineSignup", &["offline_signup", "offline"]),
    P::scalar("isOnlyEditableByCreatingUser", &["only_editable_by_creating_user", "only_editable_by_creator"]),
    P::scalar("isPreferred", &["preferred"]),
    P::scalar("isPubliclyViewable", &["publicly_viewable", "public"]),
    P::scalar("isSubscribed", &["subscribed"]),
    P::scalar("isViewRestricted", &["view_restricted"]),
    P::scalar("jobTitle", &[]),
    P::scalar("key", &[]),
    P::scalar("keyReference", &["reference"]),
    P::scalar("lastName", &["last"]),
    P::scalar("line1", &[]),
    P::scalar("line2", &[]),
    P::scalar("line3", &[]),
    P::scalar("max", &[]),
    P::scalar("mediumName", &["medium"]),
    P::scalar("message", &[]),
    P::scalar("middleName", &["middle"]),
    P::scalar("min", &[]),
    P::scalar("modifiedBy", &["modifier"]),
    P::scalar("name", &[]),
    P::scalar("nickname", &[]),
    P::scalar("notes", &[]),
    P::scalar("number", &[]),
    P::scalar("officialName", &["official"]),
    P::scalar("omitActivistCodeContactHistory", &["omit_contact_history", "omit_history"]),
    P::scalar("optInStatus", &["opt_in"]),
    P::scalar("parentCodeId", &["parent_code"]),
    P::scalar("party", &[]),
    P::scalar("phoneId", &["phone"]),
    P::scalar("phoneNumber", &["number"]),
    P::scalar("recurrenceType", &["recurrence"]),
    P::scalar("referenceCode", &["reference"]),
    P::scalar("resourceUrl", &["url"]),
    P::scalar("resultCodeId", &["result_code"]),
    P::scalar("salutation", &[]),
    P::scalar("scriptQuestion", &["question"]),
    P::scalar("sex", &[]),
    P::scalar("shortName", &["short"]),
    P::scalar("skipMatching", &[]),
    P::scalar("smsOptInStatus", &["sms_opt_in"]),
    P::scalar("startDate", &["start"]),
    P::scalar("startTime", &["start"]),
    P::scalar("startTimeOverride", &["start_override", "start"]),
    P::scalar("startingAfter", &["after"]),
    P::scalar("startingBefore", &["before"]),
    P::scalar("stateOrProvince", &["state", "province"]),
    P::scalar("status", &[]),
    P::scalar("statuses", &[]),
    P::scalar("streetAddress", &["address"]),
    P::scalar("subscriptionStatus", &["status"]),
    P::scalar("suffix", &[]),
    P::scalar("supporterGroupId", &["supporter_group", "group"]),
    P::scalar("surveyQuestionId", &["question"]),
    P::scalar("surveyResponseId", &["response"]),
    P::scalar("text", &[]),
    P::scalar("title", &[]),
    P::scalar("type", &[]),
    P::scalar("typeAndName", &[]),
    P::scalar("userFirstName", &["first_name", "first"]),
    P::scalar("userLastName", &["last_name", "last"]),
    P::scalar("username", &["user"]),
    P::scalar("value", &[]),
    P::scalar("vanId", &["van"]),
    P::scalar("volunteerActivityId", &["volunteer_activity"]),
    P::scalar("website", &[]),
    P::scalar("zipOrPostalCode", &["zip_code", "zip", "postal_code", "postal"]),
    // Query-only.
    P::expand("expand", &[]),
    P::scalar("orderby", &["order_by"]),
    // Lists of scalars.
    P::scalars("assignableTypes", &[], "assignable_type"),
    P::scalars("properties", &[], "property"),
    // Nested objects.
    P::object("address", &[], K::Address),
    P::object("canvassContext", &["context"], K::CanvassContext),
    P::object("category", &[], K::NoteCategory),
    P::object("event", &[], K::Event),
    P::object("eventType", &["type"], K::EventType),
    P::object("location", &[], K::Location),
    P::object("parentOrganization", &["parent"], K::Employer),
    P::object("person", &[], K::Person),
    P::object("role", &[], K::EventRole),
    P::object("shift", &[], K::EventShift),
    // Lists of nested objects.
    P::list("addresses", &[], "address", K::Address),
    P::list("codes", &[], "code", K::Code),
    P::list("customFieldValues", &["custom_values"], "custom_value", K::CustomFieldValue),
    P::list("customProperties", &["properties"], "property", K::KeyValuePair),
    P::list("disclosureFieldValues", &["disclosures"], "disclosure", K::DisclosureFieldValue),
    P::list("emails", &[], "email", K::Email),
    P::list("errors", &[], "error", K::Error),
    P::list("identifiers", &[], "identifier", K::Identifier),
    P::list("locations", &[], "location", K::Location),
    P::list("phones", &[], "phone", K::Phone),
    P::list("responses", &[], "response", K::ScriptResponse),
    P::list("roles", &[], "role", K::EventRole),
    P::list("shifts", &[], "shift", K::EventShift),
    P::list(
        "voterRegistrationBatches",
        &["registration_batches", "batches"],
        "batch",
        K::VoterRegistrationBatch,
    ),
];

pub const TYPES: &[T] = &[
    T::new(K::ActivistCode)
        .id("id")
        .name("name")
        .prefix("activistCode", &[])
        .shared(&["description", "isMultiAssign", "mediumName", "scriptQuestion", "shortName", "status", "type"]),
    T::new(K::ActivistCodeData)
        .id("id")
        .name("name")
        .prefix("activistCode", &["name", "typeAndName"])
        .shared(&["canvassedBy", "dateCanvassed", "dateCreated"]),
    T::new(K::Address)
        .id("id")
        .prefix("address", &["line1", "line2", "line3"])
        .shared(&["city", "countryCode", "isPreferred", "stateOrProvince", "type", "zipOrPostalCode"]),
    T::new(K::ApiKeyProfile).shared(&[
        "apiKeyTypeName",
        "committeeId",
        "committeeName",
        "databaseName",
        "hasMyCampaign",
        "hasMyVoters",
        "keyReference",
        "userFirstName",
        "userLastName",
        "username",
    ]),
    T::new(K::CanvassContext).shared(&[
        "contactTypeId",
        "dateCanvassed",
        "inputTypeId",
        "omitActivistCodeContactHistory",
        "phoneId",
        "skipMatching",
    ]),
    T::new(K::CanvassResponse).shared(&["canvassContext", "responses", "resultCodeId"]),
    T::new(K::Code)
        .id("id")
        .name("name")
        .prefix("code", &["type"])
        .shared(&["dateCreated", "dateModified", "description", "parentCodeId"]),
    T::new(K::CodeResult).id("id").prefix("code", &[]).shared(&["message"]),
    T::new(K::CustomFieldValue).shared(&["assignedValue", "customFieldGroupId", "customFieldId"]),
    T::new(K::DisclosureFieldValue)
        .id("id")
        .prefix("disclosureField", &["value"])
        .shared(&["designationId"]),
    T::new(K::Email)
        .name("email")
        .shared(&["dateCreated", "email", "isPreferred", "isSubscribed", "subscriptionStatus", "type"]),
    T::new(K::Employer)
        .id("id")
        .name("name")
        .prefix("employer", &[])
        .shared(&["isMyOrganization", "parentOrganization", "shortName", "website"]),
    T::new(K::Error).shared(&["code", "detailedCode", "hint", "properties", "referenceCode", "resourceUrl", "text"]),
    T::new(K::Event)
        .id("id")
        .name("name")
        .prefix("event", &[])
        .shared(&[
            "codes",
            "createdDate",
            "description",
            "dotNetTimeZoneId",
            "endDate",
            "eventType",
            "isActive",
            "isOnlyEditableByCreatingUser",
            "isPubliclyViewable",
            "locations",
            "roles",
            "shifts",
            "shortName",
            "startDate",
            "voterRegistrationBatches",
        ])
        .own(&[P::list("notes", &[], "note", K::Note)]),
    T::new(K::EventRole)
        .id("id")
        .name("name")
        .prefix("role", &[])
        .shared(&["goal", "isEventLead", "max", "min"]),
    T::new(K::EventShift)
        .id("id")
        .name("name")
        .prefix("eventShift", &[])
        .shared(&["endTime", "startTime"]),
    T::new(K::EventType)
        .id("id")
        .name("name")
        .prefix("eventType", &[])
        .shared(&["canHaveMultipleLocations", "canHaveMultipleShifts", "color", "roles"]),
    T::new(K::Identifier).shared(&["externalId", "type"]),
    T::new(K::KeyValuePair).shared(&["key", "value"]),
    T::new(K::Location)
        .id("id")
        .name("name")
        .prefix("location", &[])
        .shared(&["address", "displayName"]),
    T::new(K::Note)
        .id("id")
        .prefix("note", &[])
        .shared(&["category", "createdDate", "isViewRestricted", "text"]),
    T::new(K::NoteCategory)
        .id("id")
        .name("name")
        .prefix("noteCategory", &[])
        .shared(&["assignableTypes"]),
    T::new(K::Person)
        .id("id")
        .prefix("van", &[])
        .shared(&[
            "addresses",
            "customFieldValues",
            "customProperties",
            "dateOfBirth",
            "emails",
            "employer",
            "envelopeName",
            "firstName",
            "identifiers",
            "jobTitle",
            "lastName",
            "middleName",
            "nickname",
            "party",
            "phones",
            "salutation",
            "sex",
            "suffix",
            "title",
            "website",
        ]),
    T::new(K::Phone)
        .id("id")
        .name("number")
        .prefix("phone", &["number", "optInStatus", "type"])
        .shared(&["countryCode", "dateCreated", "dialingPrefix", "ext", "isPreferred", "smsOptInStatus"]),
    T::new(K::ScriptResponse)
        .shared(&["action", "surveyQuestionId", "surveyResponseId", "type", "volunteerActivityId"])
        .own(&[P::scalar("activistCodeId", &["activist_code"])]),
    T::new(K::Signup)
        .id("id")
        .prefix("eventSignup", &[])
        .shared(&[
            "dateModified",
            "endTimeOverride",
            "event",
            "isOfflineSignup",
            "location",
            "modifiedBy",
            "notes",
            "person",
            "role",
            "shift",
            "startTimeOverride",
            "supporterGroupId",
        ])
        .own(&[P::object("status", &[], K::Status)]),
    T::new(K::Status).id("id").name("name").prefix("status", &[]),
    T::new(K::SupporterGroup).id("id").name("name").shared(&["description"]),
    T::new(K::VoterRegistrationBatch)
        .id("id")
        .name("name")
        .prefix("voterRegistrationBatch", &[])
        .shared(&["dateCreated", "description", "status"]),
];
